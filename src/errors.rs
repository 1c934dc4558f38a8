use axum::response::{Html, IntoResponse, Redirect, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Backend returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Api { status, .. } => *status,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// Backend-provided message, when there is one to show.
    pub fn message(&self) -> String {
        match self {
            AppError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A rejected token is a "session invalid" signal, not a page
            // failure: send the browser back to the login form.
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::NotFound => error_response(StatusCode::NOT_FOUND, "Not Found"),
            AppError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            AppError::Api { status, message } => error_response(status, &message),
            AppError::Network(msg) => error_response(StatusCode::BAD_GATEWAY, &msg),
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Html(crate::views::error_page(status, message))).into_response()
}
