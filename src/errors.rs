//! Error types for the UptimeRobot API client

use std::fmt;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),

    /// Non-success status or timeout at the HTTP layer
    Transport(String),

    /// The API answered with `stat` other than `ok`; holds the raw response
    Api(String),

    /// The response did not have the expected shape
    MalformedResponse { reason: String, body: String },

    /// No monitor exists for the requested identifier
    NotFound(i64),

    /// The server sent a code with no registered name
    UnknownCode { kind: &'static str, code: i64 },

    /// A caller-supplied name has no registered code
    UnknownName { kind: &'static str, name: String },
}

impl ApiError {
    /// Build a malformed-response error carrying the serialized body
    pub fn malformed(reason: impl Into<String>, body: &impl serde::Serialize) -> Self {
        ApiError::MalformedResponse {
            reason: reason.into(),
            body: serde_json::to_string(body).unwrap_or_default(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(err) => write!(f, "HTTP error: {}", err),
            ApiError::Json(err) => write!(f, "JSON error: {}", err),
            ApiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Api(body) => write!(f, "API error: {}", body),
            ApiError::MalformedResponse { reason, body } => {
                write!(f, "Unknown response from the server ({}): {}", reason, body)
            }
            ApiError::NotFound(id) => write!(f, "Monitor not found: {}", id),
            ApiError::UnknownCode { kind, code } => write!(f, "Unknown {} code: {}", kind, code),
            ApiError::UnknownName { kind, name } => write!(f, "Unknown {}: {:?}", kind, name),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(err) => Some(err),
            ApiError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_includes_body() {
        let err = ApiError::malformed("missing monitors", &json!({"stat": "ok"}));
        let message = err.to_string();
        assert!(message.contains("missing monitors"));
        assert!(message.contains(r#"{"stat":"ok"}"#));
    }

    #[test]
    fn test_unknown_code_display() {
        let err = ApiError::UnknownCode { kind: "monitor type", code: 42 };
        assert_eq!(err.to_string(), "Unknown monitor type code: 42");
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
