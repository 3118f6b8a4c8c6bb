use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{errors::ApiError, metrics, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Text to encode, usually a URL
    pub url: Option<String>,
}

#[utoipa::path(
    get, path = "/contacts/generate", tag = "qr",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Inline SVG image", content_type = "image/svg+xml"),
        (status = 400, description = "The URL parameter is required."),
        (status = 500, description = "An error occurred: {message}")
    )
)]
pub async fn generate(
    State(state): State<ServerState>,
    Query(q): Query<GenerateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let url = q.url.unwrap_or_default();
    match state.qr.generate(&url) {
        Ok(image) => {
            metrics::QR_GENERATED_TOTAL.inc();
            Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
        }
        Err(e) => {
            if matches!(e, service::errors::ServiceError::Encoding(_)) {
                metrics::QR_FAILURES_TOTAL.inc();
            }
            Err(e.into())
        }
    }
}
