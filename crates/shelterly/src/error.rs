//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use shelterly_config::ConfigError;
use shelterly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the shelter service")]
    #[diagnostic(
        code(shelterly::connection_failed),
        help(
            "Check the server URL and your network.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(shelterly::auth_failed),
        help("Check your user name and password, then run: shelterly login")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(shelterly::not_logged_in),
        help("Run: shelterly login --profile {profile}")
    )]
    NotLoggedIn { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Shelter '{identifier}' not found")]
    #[diagnostic(
        code(shelterly::not_found),
        help("Run: shelterly shelters list to see available shelters")
    )]
    NotFound { identifier: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(shelterly::rejected))]
    Rejected { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(shelterly::api_error))]
    Api { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shelterly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No server configured")]
    #[diagnostic(
        code(shelterly::no_config),
        help(
            "Create a profile with: shelterly config init\n\
             Or pass --server / set SHELTERLY_SERVER.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(shelterly::config))]
    Config(#[from] ConfigError),

    #[error("Local storage error: {message}")]
    #[diagnostic(
        code(shelterly::storage),
        help("Try `token_store = \"file\"` in your profile if no keyring is available.")
    )]
    Storage { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    #[diagnostic(
        code(shelterly::interactive),
        help("Pass the value as a flag in non-interactive contexts.")
    )]
    Prompt(String),

    // ── IO / Internal ────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(shelterly::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { identifier } => CliError::NotFound { identifier },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::NotAuthenticated => CliError::NotLoggedIn {
                profile: "default".into(),
            },
            CoreError::Server { status, message } => CliError::Api { status, message },
            CoreError::Transport { reason } => CliError::ConnectionFailed { reason },
            CoreError::Storage { message } => CliError::Storage { message },
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },
            CoreError::InvalidState { message } => CliError::Rejected { message },
            CoreError::Cancelled => CliError::Internal("operation was cancelled".into()),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
