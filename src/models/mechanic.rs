use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Mecánico referenciado opcionalmente desde un log
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Mechanic {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
