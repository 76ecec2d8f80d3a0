use axum::{extract::Query, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{phone::normalize, types::Message};

use crate::errors::JsonApiError;
use crate::observability::{NORMALIZE_REJECTED_TOTAL, NORMALIZE_TOTAL};

#[derive(Debug, Deserialize)]
pub struct NormalizeParams {
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub original: String,
    pub normalized: String,
}

#[utoipa::path(get, path = "/api/", tag = "health", responses((status = 200, description = "Service banner", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new("UPN API - Russian Phone Number Tracker"))
}

/// Normalize a number without storing anything.
#[utoipa::path(
    post,
    path = "/api/normalize-phone",
    tag = "phones",
    params(("phone" = String, Query, description = "Raw phone number")),
    responses(
        (status = 200, description = "Canonical form", body = crate::openapi::NormalizeResponseDoc),
        (status = 400, description = "Not a Russian mobile number", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn normalize_phone(Query(params): Query<NormalizeParams>) -> Result<Json<NormalizeResponse>, JsonApiError> {
    NORMALIZE_TOTAL.inc();
    match normalize(&params.phone) {
        Ok(n) => Ok(Json(NormalizeResponse { original: params.phone, normalized: n.into_string() })),
        Err(e) => {
            NORMALIZE_REJECTED_TOTAL.inc();
            debug!(input = %params.phone, "normalization rejected");
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Phone Number", Some(e.to_string())))
        }
    }
}
