// Error types for collection walks, directory refreshes, and aggregate operations

use serde::Serialize;
use thiserror::Error;

/// Body returned by the platform alongside a failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Json(serde_json::Value),
    Text(String),
}

impl ErrorDetails {
    /// Structured body if it parses as JSON, raw text otherwise
    pub fn from_body(body: String) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Some(ErrorDetails::Json(value)),
            Err(_) => Some(ErrorDetails::Text(body)),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{context}: HTTP {status}")]
    Status {
        context: String,
        status: u16,
        details: Option<ErrorDetails>,
    },

    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: {message}")]
    Decode { context: String, message: String },

    #[error("Failed to fetch agent/group lookup: {0}")]
    Directory(Box<Error>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Short machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Status { .. } => "status",
            Error::Transport { .. } => "transport",
            Error::Decode { .. } => "decode",
            Error::Directory(_) => "directory",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Upstream status code, looking through directory failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Error::Directory(inner) => inner.status_code(),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Error::Status { details, .. } => details.as_ref(),
            Error::Directory(inner) => inner.details(),
            _ => None,
        }
    }

    /// Prefix the error's context, used to name the group or directory a walk belonged to
    pub fn with_context(self, prefix: &str) -> Self {
        match self {
            Error::Status {
                context,
                status,
                details,
            } => Error::Status {
                context: format!("{}: {}", prefix, context),
                status,
                details,
            },
            Error::Transport { context, source } => Error::Transport {
                context: format!("{}: {}", prefix, context),
                source,
            },
            Error::Decode { context, message } => Error::Decode {
                context: format!("{}: {}", prefix, context),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_from_json_body() {
        let details = ErrorDetails::from_body(r#"{"description":"Validation failed"}"#.into());
        assert!(matches!(details, Some(ErrorDetails::Json(_))));
    }

    #[test]
    fn test_details_from_text_body() {
        let details = ErrorDetails::from_body("Bad Gateway".into());
        assert_eq!(details, Some(ErrorDetails::Text("Bad Gateway".into())));
        assert_eq!(ErrorDetails::from_body("  ".into()), None);
    }

    #[test]
    fn test_directory_error_exposes_inner_status() {
        let inner = Error::Status {
            context: "Failed to fetch agents".into(),
            status: 401,
            details: Some(ErrorDetails::Text("denied".into())),
        };
        let err = Error::Directory(Box::new(inner));
        assert_eq!(err.kind(), "directory");
        assert_eq!(err.status_code(), Some(401));
        assert!(err.details().is_some());
        assert!(err.to_string().contains("HTTP 401"));
    }

    #[test]
    fn test_with_context_prefixes_status() {
        let err = Error::Status {
            context: "Failed to fetch tickets".into(),
            status: 500,
            details: None,
        }
        .with_context("group 7");
        assert_eq!(err.to_string(), "group 7: Failed to fetch tickets: HTTP 500");
        assert!(!err.is_validation());
    }
}
