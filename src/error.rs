use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidConfig,
    CategoryNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, message)
    }

    pub fn category_not_found(name: &str) -> Self {
        Self::new(ErrorCode::CategoryNotFound, format!("Category {} not found", name))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidConfig => StatusCode::BAD_REQUEST,
            ErrorCode::CategoryNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Failures while building a [`crate::CategoryRegistry`] from a definitions file.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read category definitions: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse category definitions: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("category {category} is invalid: {source}")]
    Invalid {
        category: String,
        #[source]
        source: ApiError,
    },
}
