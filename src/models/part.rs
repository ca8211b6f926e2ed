use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Repuesto compartido entre logs (borrar un log no borra sus parts)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub manufacturer: Option<String>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}
