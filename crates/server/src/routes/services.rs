use axum::{extract::{Path, State}, Json};

use common::types::Message;
use models::service as service_entity;
use ::service::{domain::ServiceInput, AppServices};

use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "All services", body = [crate::openapi::NamedRecordDoc])))]
pub async fn list(State(app): State<AppServices>) -> Result<Json<Vec<service_entity::Model>>, JsonApiError> {
    Ok(Json(app.services.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/services",
    tag = "services",
    request_body = crate::openapi::NamedInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::NamedRecordDoc),
        (status = 400, description = "Blank name", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(app): State<AppServices>,
    Json(input): Json<ServiceInput>,
) -> Result<Json<service_entity::Model>, JsonApiError> {
    Ok(Json(app.services.create(input).await?))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::NamedRecordDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<service_entity::Model>, JsonApiError> {
    Ok(Json(app.services.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::NamedInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::NamedRecordDoc),
        (status = 400, description = "Malformed id or blank name", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(app): State<AppServices>,
    Path(id): Path<String>,
    Json(input): Json<ServiceInput>,
) -> Result<Json<service_entity::Model>, JsonApiError> {
    Ok(Json(app.services.update(&id, input).await?))
}

/// Usage records of the service are kept.
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    app.services.delete(&id).await?;
    Ok(Json(Message::new("Service deleted successfully")))
}
