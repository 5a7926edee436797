//! Gateway client error types.

/// Errors from the backend gateway HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body.as_deref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Gateway returned an error status code
    #[error("gateway error {status}: {message}")]
    Api { status: u16, message: String },

    /// Requested resource does not exist
    #[error("not found")]
    NotFound,

    /// Token missing, expired, or rejected by the gateway
    #[error("unauthorized")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GatewayError::NotFound;
        assert_eq!(err.to_string(), "not found");

        let err = GatewayError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "gateway error 500: Internal Server Error");

        let err = GatewayError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));
        assert!(err.to_string().contains("{}"));

        let err = GatewayError::Json {
            message: "eof".into(),
            body: None,
        };
        assert!(!err.to_string().contains("body"));
    }
}
