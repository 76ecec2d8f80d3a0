pub mod meta;
pub mod operators;
pub mod phones;
pub mod search;
pub mod services;
pub mod usage;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::AppServices;

use crate::observability;
use crate::openapi::ApiDoc;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router over the given services.
pub fn build_router(app: AppServices, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api", get(meta::root))
        .route("/api/", get(meta::root))
        .route("/api/normalize-phone", post(meta::normalize_phone))
        .route("/api/operators", get(operators::list).post(operators::create))
        .route("/api/operators/:id", get(operators::get).put(operators::update).delete(operators::delete))
        .route("/api/services", get(services::list).post(services::create))
        .route("/api/services/:id", get(services::get).put(services::update).delete(services::delete))
        .route("/api/phones", get(phones::list).post(phones::create))
        .route("/api/phones/:id", get(phones::get).put(phones::update).delete(phones::delete))
        .route("/api/usage", get(usage::list).post(usage::create))
        .route("/api/usage/:id", get(usage::get).delete(usage::delete))
        .route("/api/search", get(search::search));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app)
        .layer(middleware::from_fn(observability::count_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
