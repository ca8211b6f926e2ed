//! Backend en memoria para tests y desarrollo local

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::utils::errors::{AppError, AppResult};

use super::StorageGateway;

/// Objeto almacenado en memoria
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leer un objeto subido (solo para inspección en tests)
    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait::async_trait]
impl StorageGateway for MemoryStorage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> AppResult<()> {
        // Sobrescribe en rutas repetidas, igual que un bucket real
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_url(&self, path: &str) -> AppResult<String> {
        if self.objects.read().await.contains_key(path) {
            Ok(format!("memory://{}", path))
        } else {
            Err(AppError::Storage(format!("Object '{}' not found", path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_get_url() {
        let storage = MemoryStorage::new();
        storage
            .upload("log-attachments/v/l/receipt.jpg", b"bytes", "image/jpeg")
            .await
            .unwrap();

        let url = storage.get_url("log-attachments/v/l/receipt.jpg").await.unwrap();
        assert_eq!(url, "memory://log-attachments/v/l/receipt.jpg");

        let object = storage.get("log-attachments/v/l/receipt.jpg").await.unwrap();
        assert_eq!(object.bytes, b"bytes");
        assert_eq!(object.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_upload_overwrites_same_path() {
        let storage = MemoryStorage::new();
        storage.upload("a/b", b"one", "text/plain").await.unwrap();
        storage.upload("a/b", b"two", "text/plain").await.unwrap();

        assert_eq!(storage.len().await, 1);
        assert_eq!(storage.get("a/b").await.unwrap().bytes, b"two");
    }

    #[tokio::test]
    async fn test_get_url_missing_object() {
        let storage = MemoryStorage::new();
        assert!(storage.get_url("missing").await.is_err());
    }
}
