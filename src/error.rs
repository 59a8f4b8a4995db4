use thiserror::Error;

use crate::types::ApiErrorEntry;

/// Errors returned by the SparkPost delivery client.
///
/// Exactly one failure kind per cause: the API rejecting the send, the
/// HTTP call itself failing, or a response body interpretable as neither
/// success nor error. Partial recipient rejection is not an error - it is
/// reported through [`DeliveryResult::rejected`](crate::DeliveryResult).
#[derive(Debug, Error)]
pub enum SparkPostError {
    /// The API accepted the request shape but rejected the send
    /// (validation, auth, quota). Message, description, and code come
    /// from the first entry of the response `errors` array; the complete
    /// array is retained in `errors`.
    #[error("SparkPost API error: {message}")]
    Api {
        message: String,
        description: Option<String>,
        /// Opaque provider error code.
        code: Option<String>,
        /// Every error entry the response carried, first included.
        errors: Vec<ApiErrorEntry>,
    },

    /// The HTTP call itself failed (connection, TLS, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The transport succeeded but the body could be interpreted as
    /// neither a success nor an error shape. The raw body is kept for
    /// diagnosis.
    #[error("unparseable SparkPost response")]
    UnparseableResponse { body: String },

    /// The client was constructed with invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl SparkPostError {
    /// True when the failure is transient and a retry may succeed. Only
    /// transport-level failures qualify; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The provider error code, when the API reported one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Build an API error from a response `errors` array, surfacing the
    /// first entry and retaining the rest.
    pub(crate) fn from_api_errors(entries: Vec<ApiErrorEntry>) -> Self {
        let first = entries.first().cloned().unwrap_or_default();
        Self::Api {
            message: first.message,
            description: first.description,
            code: first.code,
            errors: entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, code: &str) -> ApiErrorEntry {
        ApiErrorEntry {
            message: message.to_owned(),
            description: Some(format!("{message} description")),
            code: Some(code.to_owned()),
        }
    }

    #[test]
    fn first_error_surfaced_rest_retained() {
        let err = SparkPostError::from_api_errors(vec![
            entry("Invalid recipient", "1902"),
            entry("Quota exceeded", "2101"),
        ]);
        let SparkPostError::Api {
            message,
            description,
            code,
            errors,
        } = err
        else {
            panic!("expected Api variant");
        };
        assert_eq!(message, "Invalid recipient");
        assert_eq!(description.as_deref(), Some("Invalid recipient description"));
        assert_eq!(code.as_deref(), Some("1902"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].message, "Quota exceeded");
    }

    #[test]
    fn code_accessor_only_on_api_errors() {
        let err = SparkPostError::from_api_errors(vec![entry("Bad", "42")]);
        assert_eq!(err.code(), Some("42"));

        let err = SparkPostError::UnparseableResponse {
            body: "<html>".into(),
        };
        assert!(err.code().is_none());
    }

    #[test]
    fn api_and_format_errors_are_not_retryable() {
        assert!(!SparkPostError::from_api_errors(vec![entry("Bad", "1")]).is_retryable());
        assert!(
            !SparkPostError::UnparseableResponse { body: String::new() }.is_retryable()
        );
        assert!(!SparkPostError::Configuration("no key".into()).is_retryable());
    }

    #[test]
    fn display_messages() {
        let err = SparkPostError::from_api_errors(vec![entry("Invalid recipient", "1902")]);
        assert_eq!(err.to_string(), "SparkPost API error: Invalid recipient");

        let err = SparkPostError::Configuration("API key is required".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: API key is required"
        );

        let err = SparkPostError::UnparseableResponse {
            body: "not json".into(),
        };
        assert_eq!(err.to_string(), "unparseable SparkPost response");
    }
}
