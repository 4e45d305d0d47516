use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// HTTP-facing error for the REST handlers.
///
/// Only two outcomes are distinguished: the requested record does not exist
/// (404) or the request could not be carried out (400). Neither carries a body;
/// the cause is logged instead.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0:#}")]
    BadRequest(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError::NotFound(what.into())
    }

    /// Map any failure from a save/delete path to a 400.
    pub fn bad_request(err: impl Into<anyhow::Error>) -> Self {
        ApiError::BadRequest(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("row not found".to_string()),
            other => ApiError::BadRequest(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound(what) => tracing::warn!(%what, "Request target not found"),
            ApiError::BadRequest(err) => tracing::error!(error = %format!("{err:#}"), "Request failed"),
        }
        self.status().into_response()
    }
}

/// Convenience type alias for handler results
pub type ApiResult<T> = Result<T, ApiError>;
