pub mod contacts;
pub mod qr;

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::contact::{repository::ContactRepository, service::ContactService};
use service::qr::QrService;

use crate::metrics;
use crate::openapi::ApiDoc;

/// Shared handler state: the contact service and the QR generator.
#[derive(Clone)]
pub struct ServerState {
    pub contacts: Arc<ContactService<dyn ContactRepository>>,
    pub qr: Arc<QrService>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: contact routes, QR generation, health, metrics and docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    metrics::register_all();

    // `/contacts/generate` is a static segment and wins over `/contacts/:id`
    let api = Router::new()
        .route("/contacts", get(contacts::list).post(contacts::create))
        .route("/contacts/generate", get(qr::generate))
        .route(
            "/contacts/:id",
            get(contacts::get).put(contacts::update).delete(contacts::delete),
        )
        .route("/contacts/:id/vcard", get(contacts::vcard));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json));

    api.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
