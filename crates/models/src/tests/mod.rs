
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::{operator, phone, service, usage};

/// Connect and migrate, or `None` when no database is reachable.
pub async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[test]
fn constructors_stamp_generated_fields() -> Result<()> {
    let a = operator::Model::new("MTS", None)?;
    let b = operator::Model::new("MTS", None)?;
    assert_ne!(a.id, b.id);
    assert!(a.created_at <= b.created_at);

    let n = common::phone::normalize("89651091162")?;
    let p = phone::Model::new(&n, a.id);
    assert_eq!(p.number, "+7 965 109 11 62");
    assert_eq!(p.operator_id, a.id);

    let s = service::Model::new("Telegram", Some("aGVsbG8=".into()))?;
    let u = usage::Model::new(p.id, s.id);
    assert_eq!((u.phone_id, u.service_id), (p.id, s.id));
    Ok(())
}

#[test]
fn blank_names_are_rejected() {
    assert!(operator::Model::new("   ", None).is_err());
    assert!(service::Model::new("", None).is_err());
    assert!(crate::validate_name("Beeline").is_ok());
}

#[test]
fn models_serialize_with_plain_field_names() -> Result<()> {
    let op = operator::Model::new("Tele2", None)?;
    let v = serde_json::to_value(&op)?;
    assert_eq!(v["name"], "Tele2");
    assert!(v["logo_base64"].is_null());
    assert!(v["created_at"].is_string());
    assert_eq!(v["id"], op.id.to_string());
    Ok(())
}
