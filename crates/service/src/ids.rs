//! Record identifiers arrive as untrusted strings (path segments, foreign keys
//! in request bodies). They are parsed once, here, before any lookup.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Operator,
    Service,
    Phone,
    Usage,
}

impl RecordKind {
    /// Name used in user-facing messages, e.g. `Phone not found`.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Operator => "Operator",
            RecordKind::Service => "Service",
            RecordKind::Phone => "Phone",
            RecordKind::Usage => "Usage record",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Operator => "operator",
            RecordKind::Service => "service",
            RecordKind::Phone => "phone",
            RecordKind::Usage => "usage",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} ID")]
pub struct InvalidIdentifier {
    pub kind: RecordKind,
    pub input: String,
}

/// Parse an id of the given kind, rejecting anything that is not a UUID.
pub fn parse_id(kind: RecordKind, raw: &str) -> Result<Uuid, InvalidIdentifier> {
    Uuid::parse_str(raw.trim()).map_err(|_| InvalidIdentifier { kind, input: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(RecordKind::Phone, &id.to_string()).unwrap(), id);
        assert_eq!(parse_id(RecordKind::Phone, &format!(" {id} ")).unwrap(), id);
    }

    #[test]
    fn rejects_garbage_with_kind_in_message() {
        let err = parse_id(RecordKind::Operator, "invalid-id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid operator ID");
        assert_eq!(err.input, "invalid-id");
        assert!(parse_id(RecordKind::Usage, "").is_err());
        // 24-char hex object ids from older clients are not accepted
        assert!(parse_id(RecordKind::Service, "507f1f77bcf86cd799439011").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(RecordKind::Usage.label(), "Usage record");
        assert_eq!(RecordKind::Service.to_string(), "service");
    }
}
