//! HTTP error responses for web adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::domain::error::ForecastError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

pub fn status_from_error(err: &ForecastError) -> StatusCode {
    match err {
        ForecastError::ConfigMissing { .. }
        | ForecastError::ConfigInvalid { .. }
        | ForecastError::ConfigParse { .. } => StatusCode::BAD_REQUEST,
        ForecastError::NoData { .. } => StatusCode::NOT_FOUND,
        ForecastError::DataSource { .. } | ForecastError::MalformedRecord { .. } => {
            StatusCode::BAD_GATEWAY
        }
        ForecastError::Report { .. } | ForecastError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ForecastError> for WebError {
    fn from(err: ForecastError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
