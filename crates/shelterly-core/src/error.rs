// ── Core error types ──
//
// User-facing errors from shelterly-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<shelterly_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Shelter not found: {identifier}")]
    NotFound { identifier: String },

    // ── Auth ─────────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not authenticated -- log in first")]
    NotAuthenticated,

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Server rejected the request (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Cannot reach the shelter service: {reason}")]
    Transport { reason: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Local storage error: {message}")]
    Storage { message: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Operation not valid right now: {message}")]
    InvalidState { message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message a screen should show for this failure.
    ///
    /// Server and credential rejections carry their message verbatim;
    /// everything else uses the full display text.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed { message } | Self::Server { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shelterly_api::Error> for CoreError {
    fn from(err: shelterly_api::Error) -> Self {
        match err {
            shelterly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            shelterly_api::Error::Unauthorized => CoreError::AuthenticationFailed {
                message: "Session expired or revoked -- log in again".into(),
            },
            shelterly_api::Error::Transport(e) => CoreError::Transport {
                reason: e.to_string(),
            },
            shelterly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shelterly_api::Error::Tls(msg) => CoreError::Transport {
                reason: format!("TLS error: {msg}"),
            },
            shelterly_api::Error::NotFound { path } => CoreError::NotFound { identifier: path },
            shelterly_api::Error::Api { status, message } => CoreError::Server { status, message },
            shelterly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_verbatim() {
        let err = CoreError::from(shelterly_api::Error::Api {
            status: 409,
            message: "Name already taken".into(),
        });
        assert_eq!(err.user_message(), "Name already taken");
    }

    #[test]
    fn auth_message_is_verbatim() {
        let err = CoreError::from(shelterly_api::Error::Authentication {
            message: "No token found".into(),
        });
        assert_eq!(err.user_message(), "No token found");
    }

    #[test]
    fn other_errors_use_display_text() {
        assert_eq!(
            CoreError::NotAuthenticated.user_message(),
            "Not authenticated -- log in first"
        );
    }

    #[test]
    fn api_not_found_maps_to_not_found() {
        let err = CoreError::from(shelterly_api::Error::NotFound {
            path: "/shelters/x".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
