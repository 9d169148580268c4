use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Server not configured: missing NOTION_TOKEN or NOTION_DATABASE_ID";

#[derive(Debug)]
pub enum RelayError {
    MethodNotAllowed,
    NotConfigured,
    MalformedBody(String),
    /// Notion answered with a non-success status; relayed as-is.
    Remote { status: StatusCode, payload: Value },
    Transport(String),
    Internal(String),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::MethodNotAllowed => write!(f, "Method not allowed"),
            RelayError::NotConfigured => write!(f, "{NOT_CONFIGURED_MESSAGE}"),
            RelayError::MalformedBody(msg) => write!(f, "{msg}"),
            RelayError::Remote { status, payload } => {
                write!(f, "Notion rejected the request ({status}): {payload}")
            }
            RelayError::Transport(msg) => write!(f, "{msg}"),
            RelayError::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            RelayError::MethodNotAllowed => {
                tracing::debug!("Rejected request with unsupported method");
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Value::String("Method not allowed".to_string()),
                )
            }
            RelayError::NotConfigured => {
                tracing::error!("{NOT_CONFIGURED_MESSAGE}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String(NOT_CONFIGURED_MESSAGE.to_string()),
                )
            }
            RelayError::MalformedBody(msg) => {
                tracing::error!("Malformed submission body: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
            RelayError::Remote { status, payload } => {
                tracing::error!("Notion returned {status}: {payload}");
                (status, payload)
            }
            RelayError::Transport(msg) => {
                tracing::error!("Notion request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
            RelayError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
        };

        (status, axum::Json(json!({ "error": error }))).into_response()
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::MalformedBody(format!("Invalid JSON: {err}"))
    }
}
