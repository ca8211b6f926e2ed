//! Abstracción de almacenamiento de archivos
//!
//! Gateway para subir avatares y adjuntos y resolver URLs de lectura.

pub mod memory;
pub mod s3;

pub use memory::MemoryStorage;
pub use s3::S3Storage;

use uuid::Uuid;

use crate::utils::errors::AppResult;

/// Gateway de almacenamiento (S3 compatible / memoria para tests)
#[async_trait::async_trait]
pub trait StorageGateway: Send + Sync {
    /// Subir bytes bajo una ruta lógica. Sobrescribe si la ruta ya existe.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> AppResult<()>;

    /// URL de lectura para una ruta ya subida
    async fn get_url(&self, path: &str) -> AppResult<String>;
}

/// Ruta de un adjunto de log: `log-attachments/{vehicleId}/{logId}/{filename}`
pub fn log_attachment_path(vehicle_id: Uuid, log_id: Uuid, filename: &str) -> String {
    format!("log-attachments/{}/{}/{}", vehicle_id, log_id, filename)
}

/// Ruta del avatar de un vehículo: `vehicle-avatars/{userId}/{timestamp}`
pub fn vehicle_avatar_path(user_id: Uuid, timestamp_millis: i64) -> String {
    format!("vehicle-avatars/{}/{}", user_id, timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_attachment_path() {
        let vehicle_id = Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap();
        let log_id = Uuid::parse_str("aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee").unwrap();
        assert_eq!(
            log_attachment_path(vehicle_id, log_id, "receipt.jpg"),
            "log-attachments/11111111-2222-3333-4444-555555555555/aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee/receipt.jpg"
        );
    }

    #[test]
    fn test_vehicle_avatar_path() {
        let user_id = Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap();
        assert_eq!(
            vehicle_avatar_path(user_id, 1700000000000),
            "vehicle-avatars/11111111-2222-3333-4444-555555555555/1700000000000"
        );
    }
}
