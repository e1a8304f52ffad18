use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use haul_core::{ErrorKind, LookupError};

/// Wrapper so we can implement `IntoResponse` for `LookupError`.
///
/// Validation kinds answer 400 and `unknown_error` answers 500. Every
/// other classified failure is a completed lookup and answers 200 with
/// the error object as the body.
#[derive(Debug)]
pub struct ApiError(pub LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.error {
            kind if kind.is_validation() => StatusCode::BAD_REQUEST,
            ErrorKind::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(self.0)).into_response()
    }
}
