// ── Runtime client configuration ──
//
// Describes *how* to reach the back office and how optimistic edits are
// reconciled. Never touches disk: the CLI builds a `ClientConfig` from
// its profile and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// What happens to an optimistic cache edit when its request fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    /// Undo the edit and report the error.
    #[default]
    Revert,
    /// Leave the edit in place and report the error.
    Keep,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one back-office connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Resource base URL, e.g. `http://localhost:8080/Locapart/resources/`.
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    pub reconcile: ReconcilePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(locapart_api::DEFAULT_BASE_URL)
                .expect("default base URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            reconcile: ReconcilePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub(crate) fn transport(&self) -> locapart_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => locapart_api::TlsMode::System,
            TlsVerification::CustomCa(path) => locapart_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => locapart_api::TlsMode::DangerAcceptInvalid,
        };
        locapart_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
