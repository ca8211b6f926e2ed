use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Entrada de mantenimiento de un vehículo
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Log {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub mechanic_id: Option<Uuid>,
    pub title: String,
    pub notes: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub log_type: String,
    pub cost: Option<Decimal>,
    pub odometer: Option<Decimal>,
    pub serviced_at: DateTime<Utc>,
    pub self_service: bool,
    pub attachments_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
