use axum::{extract::{Path, State}, Json};

use common::types::Message;
use models::phone;
use ::service::{domain::PhoneInput, AppServices};

use crate::errors::JsonApiError;
use crate::observability::PHONES_CREATED_TOTAL;

#[utoipa::path(get, path = "/api/phones", tag = "phones", responses((status = 200, description = "All phones", body = [crate::openapi::PhoneDoc])))]
pub async fn list(State(app): State<AppServices>) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(app.phones.list().await?))
}

/// The number is normalized before it is checked and stored.
#[utoipa::path(
    post,
    path = "/api/phones",
    tag = "phones",
    request_body = crate::openapi::PhoneInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PhoneDoc),
        (status = 400, description = "Invalid number or operator id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Operator not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Number already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(app): State<AppServices>,
    Json(input): Json<PhoneInput>,
) -> Result<Json<phone::Model>, JsonApiError> {
    let created = app.phones.create(input).await?;
    PHONES_CREATED_TOTAL.inc();
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/phones/{id}",
    tag = "phones",
    params(("id" = String, Path, description = "Phone id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PhoneDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<phone::Model>, JsonApiError> {
    Ok(Json(app.phones.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/phones/{id}",
    tag = "phones",
    params(("id" = String, Path, description = "Phone id")),
    request_body = crate::openapi::PhoneInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::PhoneDoc),
        (status = 400, description = "Invalid number or id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Phone or operator not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Number held by another phone", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(app): State<AppServices>,
    Path(id): Path<String>,
    Json(input): Json<PhoneInput>,
) -> Result<Json<phone::Model>, JsonApiError> {
    Ok(Json(app.phones.update(&id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/phones/{id}",
    tag = "phones",
    params(("id" = String, Path, description = "Phone id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(app): State<AppServices>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    app.phones.delete(&id).await?;
    Ok(Json(Message::new("Phone deleted successfully")))
}
