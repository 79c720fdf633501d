//! Booking API error types.

/// Errors from the booking backend collaborators.
///
/// All of these are transport-level: the session treats a failed status
/// check as transient and a failed submission as fatal, whatever the variant.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body wasn't the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Backend reported an order status the client doesn't know
    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    /// Response parsed but carried invalid data
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request didn't complete in time
    #[error("request timed out")]
    Timeout,

    /// Feature not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = ApiError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected string");

        let err = ApiError::UnknownStatus("REFUNDED".into());
        assert_eq!(err.to_string(), "unknown order status: REFUNDED");

        assert_eq!(ApiError::Timeout.to_string(), "request timed out");
        assert_eq!(
            ApiError::NotConfigured("no base URL".into()).to_string(),
            "not configured: no base URL"
        );
    }
}
