use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct NormalizeResponseDoc { pub original: String, pub normalized: String }

/// Body for creating or replacing an operator or a service.
#[derive(ToSchema)]
pub struct NamedInputDoc { pub name: String, pub logo_base64: Option<String> }

#[derive(ToSchema)]
pub struct NamedRecordDoc {
    pub id: Uuid,
    pub name: String,
    pub logo_base64: Option<String>,
    pub created_at: String,
}

/// `number` is free-form; it is stored as `+7 DDD DDD DD DD`.
#[derive(ToSchema)]
pub struct PhoneInputDoc { pub number: String, pub operator_id: String }

#[derive(ToSchema)]
pub struct PhoneDoc { pub id: Uuid, pub number: String, pub operator_id: Uuid, pub created_at: String }

#[derive(ToSchema)]
pub struct UsageInputDoc { pub phone_id: String, pub service_id: String }

#[derive(ToSchema)]
pub struct UsageDoc { pub id: Uuid, pub phone_id: Uuid, pub service_id: Uuid, pub used_at: String }

#[derive(ToSchema)]
pub struct SearchResultDoc {
    /// `phone` or `service`
    #[schema(rename = "type")]
    pub kind: String,
    pub id: Uuid,
    pub display_text: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "UPN API", description = "Russian Phone Number Tracker"),
    paths(
        crate::routes::health,
        crate::routes::meta::root,
        crate::routes::meta::normalize_phone,
        crate::routes::operators::list,
        crate::routes::operators::create,
        crate::routes::operators::get,
        crate::routes::operators::update,
        crate::routes::operators::delete,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::phones::list,
        crate::routes::phones::create,
        crate::routes::phones::get,
        crate::routes::phones::update,
        crate::routes::phones::delete,
        crate::routes::usage::list,
        crate::routes::usage::create,
        crate::routes::usage::get,
        crate::routes::usage::delete,
        crate::routes::search::search,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            NormalizeResponseDoc,
            NamedInputDoc,
            NamedRecordDoc,
            PhoneInputDoc,
            PhoneDoc,
            UsageInputDoc,
            UsageDoc,
            SearchResultDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "phones"),
        (name = "operators"),
        (name = "services"),
        (name = "usage"),
        (name = "search")
    )
)]
pub struct ApiDoc;
