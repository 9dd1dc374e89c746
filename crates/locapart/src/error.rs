//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use locapart_config::ConfigError;
use locapart_core::{CoreError, FieldErrors};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Remote ───────────────────────────────────────────────────────
    #[error("Could not load the {resource} list")]
    #[diagnostic(
        code(locapart::fetch_failed),
        help(
            "Check that the back office is running and reachable.\n\
             Override the address with --base-url or `locapart config init`."
        )
    )]
    FetchFailed {
        resource: String,
        #[source]
        source: CoreError,
    },

    #[error("The server rejected the {resource} change")]
    #[diagnostic(code(locapart::mutation_failed))]
    MutationFailed {
        resource: String,
        #[source]
        source: CoreError,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} {id} not found")]
    #[diagnostic(
        code(locapart::not_found),
        help("Run: locapart {list_command} to see available ids")
    )]
    NotFound {
        resource: String,
        id: i64,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {resource}: {errors}")]
    #[diagnostic(code(locapart::invalid_form), help("{hint}"))]
    InvalidForm {
        resource: String,
        errors: FieldErrors,
        hint: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(locapart::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(locapart::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: locapart config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(locapart::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    #[diagnostic(
        code(locapart::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt(#[from] dialoguer::Error),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed { .. } => exit_code::CONNECTION,
            Self::MutationFailed { source, .. } if source.status().is_none() => {
                exit_code::CONNECTION
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::MutationFailed { source, .. } if source.is_not_found() => exit_code::NOT_FOUND,
            Self::InvalidForm { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::Prompt(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// `apartment` → `apartments list`.
fn list_command(resource: &str) -> String {
    format!("{resource}s list")
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fetch { resource, .. } => CliError::FetchFailed {
                resource: resource.into(),
                source: err,
            },

            CoreError::Mutation { resource, .. } => CliError::MutationFailed {
                resource: resource.into(),
                source: err,
            },

            CoreError::Validation { resource, errors } => {
                let hint = errors
                    .failures()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                CliError::InvalidForm {
                    resource: resource.into(),
                    errors,
                    hint,
                }
            }

            CoreError::NotFound { resource, id } => CliError::NotFound {
                resource: resource.into(),
                id,
                list_command: list_command(resource),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
