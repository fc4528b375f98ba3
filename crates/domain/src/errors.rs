//! Error types used throughout the SUFT client

use thiserror::Error;

/// Main error type for SUFT operations
#[derive(Debug, Error)]
pub enum SuftError {
    /// Network, DNS, or timeout failure. Never retried by the client.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The authenticate or refresh endpoint rejected the request.
    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    /// A 401 persisted after the single refresh-and-retry, or the refresh
    /// itself was rejected. The caller must authenticate with credentials.
    #[error("session expired; authenticate again with credentials")]
    SessionExpired,

    /// A resource endpoint returned a non-success status. Carries the raw
    /// response body as reported by the server.
    #[error("request rejected (HTTP {status}): {body}")]
    Resource { status: u16, body: String },

    /// A success response carried a body the client could not decode.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Input rejected locally before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for SUFT operations
pub type Result<T> = std::result::Result<T, SuftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_carries_server_body() {
        let err = SuftError::Resource { status: 409, body: "period already reported".into() };
        let rendered = err.to_string();
        assert!(rendered.contains("409"));
        assert!(rendered.contains("period already reported"));
    }

    #[test]
    fn session_expired_points_at_reauthentication() {
        assert!(SuftError::SessionExpired.to_string().contains("authenticate again"));
    }
}
