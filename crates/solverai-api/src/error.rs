use reqwest::StatusCode;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Body of a failed response.
///
/// The services answer with a JSON document most of the time (`{"detail": ...}` or a
/// field-to-messages map), but proxies in front of them may answer with plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorBody {
    Json(serde_json::Value),
    Raw(String),
}

impl ApiErrorBody {
    /// Decode a response body, keeping the raw text when it is not JSON.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => ApiErrorBody::Json(value),
            Err(_) => ApiErrorBody::Raw(text),
        }
    }

    /// The `detail` message of a JSON body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiErrorBody::Json(value) => value.get("detail").and_then(|d| d.as_str()),
            ApiErrorBody::Raw(_) => None,
        }
    }
}

impl Default for ApiErrorBody {
    fn default() -> Self {
        ApiErrorBody::Raw("An unknown error occurred".to_string())
    }
}

impl Display for ApiErrorBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorBody::Json(value) => match self.detail() {
                Some(detail) => write!(f, "{detail}"),
                None => write!(f, "{value}"),
            },
            ApiErrorBody::Raw(text) if text.is_empty() => write!(f, "<empty body>"),
            ApiErrorBody::Raw(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Api error {status}: {body}")]
    ApiError {
        status: StatusCode,
        body: ApiErrorBody,
    },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),
    #[error("Failed to read attachment: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to encode table: {0}")]
    Csv(String),
    #[error("Unknown Error: {0}")]
    UnknownError(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ClientError::ApiError {
                status,
                body: ApiErrorBody::Raw(error.to_string()),
            },
            None if error.is_decode() => ClientError::MalformedResponse(error.to_string()),
            None => ClientError::UnknownError(error.to_string()),
        }
    }
}

impl From<csv::Error> for ClientError {
    fn from(error: csv::Error) -> Self {
        ClientError::Csv(error.to_string())
    }
}
