// src/error.rs
//! Error types with structured error handling.
//!
//! [`SourceError`] is the one failure shape of the Notion-facing core: every
//! transport, HTTP, parsing and configuration failure ends up as one of its
//! variants, so callers match a closed set instead of probing fields.
//! [`AppError`] covers the binary's own failures around it.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Codes this client doesn't recognize are kept verbatim in `Unknown`, so
/// `to_string()` always reproduces exactly what Notion sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this error is transient. Nothing here retries; callers that
    /// schedule the next run use it to tell a bad config from a bad minute.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Every way a call against a knowledge source can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Connection refused, DNS failure, timeout.
    #[error("Network failure: {message}")]
    Network { message: String },

    /// Non-2xx status whose body carried no error code.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Error object returned by Notion, with either a non-2xx status or an
    /// `"object": "error"` body.
    #[error("Notion API returned an error ({code}): {message}")]
    Remote {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    /// A 2xx body that is not JSON at all.
    #[error("Invalid JSON in response: {message}")]
    InvalidJson { message: String },

    /// JSON that does not have the expected shape.
    #[error("Response failed validation: {message}")]
    Validation { message: String },

    /// Required configuration is missing or unusable; raised before any call.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SourceError {
    /// Machine-readable code reported in result envelopes.
    pub fn code(&self) -> String {
        match self {
            Self::Network { .. } => "network_error".to_string(),
            Self::Http { status, .. } => format!("HTTP_{}", status),
            Self::Remote { code, .. } => code.to_string(),
            Self::InvalidJson { .. } => "invalid_json".to_string(),
            Self::Validation { .. } => "validation_error".to_string(),
            Self::Config { .. } => "config_error".to_string(),
        }
    }

    /// Human-readable detail, without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Http { message, .. }
            | Self::Remote { message, .. }
            | Self::InvalidJson { message }
            | Self::Validation { message }
            | Self::Config { message } => message,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<crate::types::ValidationError> for SourceError {
    fn from(err: crate::types::ValidationError) -> Self {
        SourceError::Validation {
            message: err.to_string(),
        }
    }
}

/// Failures of the command-line application itself.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Failed to encode result envelope: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Failed to build HTTP transport: {0}")]
    Transport(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_codes_display_verbatim() {
        for code in ["rate_limited", "validation_error", "some_future_code"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
    }

    #[test]
    fn source_error_codes() {
        let cases = [
            (
                SourceError::Network {
                    message: "dns".into(),
                },
                "network_error",
            ),
            (
                SourceError::Http {
                    status: 502,
                    message: "bad gateway".into(),
                },
                "HTTP_502",
            ),
            (
                SourceError::Remote {
                    code: NotionErrorCode::RateLimited,
                    message: "slow down".into(),
                    status: 429,
                },
                "rate_limited",
            ),
            (SourceError::validation("missing field"), "validation_error"),
            (SourceError::config("no key"), "config_error"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.code(), expected);
        }
    }

    #[test]
    fn message_omits_code() {
        let error = SourceError::Remote {
            code: NotionErrorCode::ObjectNotFound,
            message: "Could not find database".into(),
            status: 404,
        };
        assert_eq!(error.message(), "Could not find database");
        assert!(error.to_string().contains("object_not_found"));
    }

    #[test]
    fn transient_codes() {
        assert!(NotionErrorCode::RateLimited.is_transient());
        assert!(!NotionErrorCode::Unauthorized.is_transient());
    }
}
