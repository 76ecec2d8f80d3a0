//! Input shapes accepted by the services. Ids and timestamps are never part of
//! them; the store assigns both.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create/replace input for operators and services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedInput {
    pub name: String,
    #[serde(default)]
    pub logo_base64: Option<String>,
}

pub type OperatorInput = NamedInput;
pub type ServiceInput = NamedInput;

/// Phone input; `number` is raw user text, `operator_id` an unparsed id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneInput {
    pub number: String,
    pub operator_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageInput {
    pub phone_id: String,
    pub service_id: String,
}

/// Kind tag of a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Phone,
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub id: Uuid,
    pub display_text: String,
}
