//! Server-specific error types

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use subvtt_lib::SubtitleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Library(#[from] SubtitleError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("No cues could be extracted from the {0} document")]
    NoCues(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Library(SubtitleError::UnknownFormat(_)) | ServerError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Body(rejection) => rejection.status(),
            ServerError::NoCues(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Config(_) | ServerError::Io(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used for the error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Library(SubtitleError::UnknownFormat(_)) => "unknown_format",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Body(_) => "invalid_body",
            ServerError::NoCues(_) => "no_cues",
            ServerError::Config(_) => "config",
            ServerError::Io(_) => "io",
            ServerError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
