use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Usuario dueño de vehículos y logs
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
