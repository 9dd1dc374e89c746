// ── Core error types ──
//
// User-facing errors from locapart-core. Transport failures are caught
// at the resource-client boundary and folded into `Fetch` (reads) or
// `Mutation` (writes); consumers never match on HTTP details.

use strum::Display;
use thiserror::Error;

use crate::validate::FieldErrors;

/// Which write a `Mutation` error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("Failed to fetch {resource} list: {message}")]
    Fetch {
        resource: &'static str,
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    #[error("Failed to {operation} {resource}: {message}")]
    Mutation {
        resource: &'static str,
        operation: MutationKind,
        message: String,
        status: Option<u16>,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Invalid {resource}: {errors}")]
    Validation {
        resource: &'static str,
        errors: FieldErrors,
    },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn fetch(resource: &'static str, err: &locapart_api::Error) -> Self {
        Self::Fetch {
            resource,
            message: err.to_string(),
            status: err.status(),
        }
    }

    pub(crate) fn mutation(
        resource: &'static str,
        operation: MutationKind,
        err: &locapart_api::Error,
    ) -> Self {
        Self::Mutation {
            resource,
            operation,
            message: err.to_string(),
            status: err.status(),
        }
    }

    /// HTTP status attached to a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } | Self::Mutation { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the server reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }
}

impl From<locapart_api::Error> for CoreError {
    /// Errors raised outside a resource operation (client construction).
    fn from(err: locapart_api::Error) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}
