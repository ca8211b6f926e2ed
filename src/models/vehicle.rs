use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Vehículo registrado por un usuario
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
