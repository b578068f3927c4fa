use thiserror::Error;

/// Failures surfaced by the location client.
///
/// `Display` is the human-readable message handed back to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("{0}")]
    NetworkUnavailable(String),

    /// The response body was not valid JSON.
    #[error("Could not parse the data as JSON: {0}")]
    MalformedResponse(String),

    /// Valid JSON that lacks a key the operation depends on.
    #[error("Could not find key : {key} in parsed result, method : {context}")]
    UnexpectedResponseShape { key: &'static str, context: &'static str },

    /// A single list element was dropped during decoding.
    #[error("Skipped result {index}: {reason}")]
    DecodeSkipped { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// The HTTP client could not be set up; no request was attempted.
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_names_the_missing_key() {
        let err = ClientError::UnexpectedResponseShape {
            key: "createdAt",
            context: "submit_location",
        };
        let message = err.to_string();
        assert!(message.contains("createdAt"));
        assert!(message.contains("submit_location"));
    }

    #[test]
    fn network_error_is_passed_through_verbatim() {
        let err = ClientError::NetworkUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn http_client_setup_failure_is_a_config_error() {
        let err = ConfigError::HttpClient("no TLS backend".to_string());
        assert_eq!(err.to_string(), "could not build HTTP client: no TLS backend");
    }
}
