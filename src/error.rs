use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use std::env;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The round trip exceeded the configured timeout.
    Timeout,
    /// No response was received at all (DNS, refused connection, reset).
    Network(String),
    /// A response arrived with a non-success status.
    Http { status: u16, body: Option<Value> },
    Decode(String),
    Config(String),
    InvalidInput(String),
    NotFound,
    Server(String),
}

impl Error {
    pub fn code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Network(_) => 2,
            Self::Timeout => 3,
            Self::Http { .. } => 4,
            Self::Decode(_) => 5,
            Self::Server(_) => 6,
            Self::InvalidInput(_) => 100,
            Self::NotFound => 101,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound) || self.status() == Some(404)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Http {
                status,
                body: Some(body),
            } => write!(f, "http error {}: {}", status, body),
            Self::Http { status, body: None } => write!(f, "http error {}", status),
            Self::Decode(msg) => write!(f, "decode error: {}", msg),
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::NotFound => write!(f, "not found"),
            Self::Server(msg) => write!(f, "server error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        let body = Json(json!({
            "code": self.code(),
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error(message: impl Into<String>) -> Error {
    Error::InvalidInput(message.into())
}

pub fn not_found_error() -> Error {
    Error::NotFound
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error::Config(format!("environment variable error: {}", err))
}

/// Sorts transport failures into the timeout / network / decode buckets.
/// Status errors never reach here since the client inspects statuses itself.
pub fn reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_decode() {
        Error::Decode(err.to_string())
    } else if err.is_builder() {
        Error::Config(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

#[test]
fn error_response_codes_test() {
    let res = not_found_error().into_response();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = invalid_input_error("bad").into_response();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = Error::Server("boom".into()).into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn http_error_classification_test() {
    let err = Error::Http {
        status: 404,
        body: Some(json!({ "code": 101, "error": "not found" })),
    };

    assert!(err.is_not_found());
    assert!(!err.is_timeout());
    assert_eq!(err.status(), Some(404));
    assert_eq!(Error::Timeout.status(), None);
    assert!(Error::Timeout.is_timeout());
}
