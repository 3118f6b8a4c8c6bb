use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use tracing::error;

/// Boundary wrapper mapping service failures to a status and a plain-text body.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::CapacityExceeded { .. } | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.0.to_string();
        if status.is_server_error() {
            error!(error = %msg, code = self.0.code(), "request failed");
        }
        (status, msg).into_response()
    }
}
