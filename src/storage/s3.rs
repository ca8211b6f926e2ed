//! Backend S3 compatible (AWS S3, Cloudflare R2, MinIO)

use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::Region;

use crate::utils::errors::{AppError, AppResult};

use super::StorageGateway;

/// Segundos de validez de las URLs presignadas
const PRESIGN_EXPIRY_SECS: u32 = 3600;

pub struct S3Storage {
    bucket: Box<Bucket>,
    bucket_name: String,
}

impl S3Storage {
    pub fn new(
        bucket_name: String,
        region: String,
        endpoint: Option<String>,
        access_key: String,
        secret_key: String,
    ) -> AppResult<Self> {
        let region = match endpoint {
            Some(endpoint) => Region::Custom {
                region,
                endpoint,
            },
            None => region
                .parse()
                .map_err(|e| AppError::Storage(format!("Invalid S3 region: {}", e)))?,
        };

        let credentials = Credentials::new(Some(&access_key), Some(&secret_key), None, None, None)
            .map_err(|e| AppError::Storage(format!("S3 credentials error: {}", e)))?;

        let bucket = Bucket::new(&bucket_name, region, credentials)
            .map_err(|e| AppError::Storage(format!("S3 bucket error: {}", e)))?;

        Ok(Self {
            bucket,
            bucket_name,
        })
    }
}

#[async_trait::async_trait]
impl StorageGateway for S3Storage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> AppResult<()> {
        self.bucket
            .put_object_with_content_type(path, bytes, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {}", e)))?;

        tracing::info!("S3 upload: bucket={}, path={}", self.bucket_name, path);
        Ok(())
    }

    async fn get_url(&self, path: &str) -> AppResult<String> {
        self.bucket
            .presign_get(path, PRESIGN_EXPIRY_SECS, None)
            .await
            .map_err(|e| AppError::Storage(format!("S3 presign failed: {}", e)))
    }
}
