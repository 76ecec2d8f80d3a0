use axum::{extract::{Path, State}, Json};

use common::types::Message;
use models::operator;
use ::service::{domain::OperatorInput, AppServices};

use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/operators", tag = "operators", responses((status = 200, description = "All operators", body = [crate::openapi::NamedRecordDoc])))]
pub async fn list(State(app): State<AppServices>) -> Result<Json<Vec<operator::Model>>, JsonApiError> {
    Ok(Json(app.operators.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/operators",
    tag = "operators",
    request_body = crate::openapi::NamedInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::NamedRecordDoc),
        (status = 400, description = "Blank name", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(app): State<AppServices>,
    Json(input): Json<OperatorInput>,
) -> Result<Json<operator::Model>, JsonApiError> {
    Ok(Json(app.operators.create(input).await?))
}

#[utoipa::path(
    get,
    path = "/api/operators/{id}",
    tag = "operators",
    params(("id" = String, Path, description = "Operator id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::NamedRecordDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<operator::Model>, JsonApiError> {
    Ok(Json(app.operators.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/operators/{id}",
    tag = "operators",
    params(("id" = String, Path, description = "Operator id")),
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
    Json(input): Json<OperatorInput>,
) -> Result<Json<operator::Model>, JsonApiError> {
    Ok(Json(app.operators.update(&id, input).await?))
}

/// Phones issued by the operator are kept.
#[utoipa::path(
    delete,
    path = "/api/operators/{id}",
    tag = "operators",
    params(("id" = String, Path, description = "Operator id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    app.operators.delete(&id).await?;
    Ok(Json(Message::new("Operator deleted successfully")))
}
