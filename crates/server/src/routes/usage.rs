use axum::{extract::{Path, State}, Json};

use common::types::Message;
use models::usage;
use ::service::{domain::UsageInput, AppServices};

use crate::errors::JsonApiError;
use crate::observability::USAGES_CREATED_TOTAL;

#[utoipa::path(get, path = "/api/usage", tag = "usage", responses((status = 200, description = "All usage records", body = [crate::openapi::UsageDoc])))]
pub async fn list(State(app): State<AppServices>) -> Result<Json<Vec<usage::Model>>, JsonApiError> {
    Ok(Json(app.usages.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/usage",
    tag = "usage",
    request_body = crate::openapi::UsageInputDoc,
    responses(
        (status = 200, description = "Recorded", body = crate::openapi::UsageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Phone or service not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Already recorded", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(app): State<AppServices>,
    Json(input): Json<UsageInput>,
) -> Result<Json<usage::Model>, JsonApiError> {
    let created = app.usages.create(input).await?;
    USAGES_CREATED_TOTAL.inc();
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/usage/{id}",
    tag = "usage",
    params(("id" = String, Path, description = "Usage record id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UsageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<usage::Model>, JsonApiError> {
    Ok(Json(app.usages.get(&id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/usage/{id}",
    tag = "usage",
    params(("id" = String, Path, description = "Usage record id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    app.usages.delete(&id).await?;
    Ok(Json(Message::new("Usage record deleted successfully")))
}
