use thiserror::Error;

/// Top-level error type for the `shelterly-api` crate.
///
/// Covers every failure mode of the remote API: authentication,
/// transport, server-side rejections, and payload decoding.
/// `shelterly-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in rejected (bad credentials) or no token in the response.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Bearer token missing, expired, or revoked on an authenticated call.
    #[error("Unauthorized -- the session token was rejected")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The server has no resource at the requested path.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response, with the server's message.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error is a credential or token rejection.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Unauthorized)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        assert!(
            Error::NotFound {
                path: "/shelters/x".into()
            }
            .is_not_found()
        );
        assert!(
            Error::Api {
                status: 404,
                message: "gone".into()
            }
            .is_not_found()
        );
        assert!(!Error::Unauthorized.is_not_found());
    }

    #[test]
    fn auth_errors() {
        assert!(Error::Unauthorized.is_auth_error());
        assert!(
            Error::Authentication {
                message: "nope".into()
            }
            .is_auth_error()
        );
        assert!(!Error::Tls("x".into()).is_auth_error());
    }
}
