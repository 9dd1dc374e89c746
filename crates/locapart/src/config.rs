//! CLI configuration: thin wrapper around `locapart_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides (`--base-url`,
//! `--timeout`, `--insecure`, `--keep-on-failure`).

use std::time::Duration;

use locapart_core::{ClientConfig, ReconcilePolicy, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use locapart_config::{
    Config, Profile, config_path, load_config, load_config_or_default, parse_base_url,
    profile_to_client_config, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the `ClientConfig` for this invocation.
///
/// Precedence: flags, then the active profile, then `[defaults]`. With no
/// profile at all, the built-in base URL is used unless `--base-url` is
/// given; naming a missing profile explicitly is an error.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile_to_client_config(profile, &cfg.defaults)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => profile_to_client_config(&Profile::default(), &cfg.defaults)?,
    };

    if let Some(ref raw) = global.base_url {
        client.base_url = parse_base_url(raw)?;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if global.keep_on_failure {
        client.reconcile = ReconcilePolicy::Keep;
    }

    tracing::debug!(
        profile = %profile_name,
        base_url = %client.base_url,
        reconcile = ?client.reconcile,
        "resolved client config"
    );
    Ok(client)
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
