use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Tag compartido entre logs (borrar un log no borra sus tags)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
