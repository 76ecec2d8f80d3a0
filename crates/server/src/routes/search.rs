use axum::{extract::{Query, State}, Json};
use serde::Deserialize;

use ::service::{domain::SearchResult, AppServices};

use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Phones first, then services; at most 10 of each.
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "search",
    params(("q" = String, Query, description = "Phone fragment, phone number in any format, or service name")),
    responses(
        (status = 200, description = "Matches", body = [crate::openapi::SearchResultDoc]),
        (status = 400, description = "Empty query", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search(
    State(app): State<AppServices>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, JsonApiError> {
    Ok(Json(app.search.search(&params.q).await?))
}
