use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::Region;

use crate::config::R2Config;
use crate::error::{AppError, AppResult};

use super::StorageBackend;

pub struct R2Backend {
    bucket: Box<Bucket>,
    bucket_name: String,
}

impl R2Backend {
    pub fn new(config: &R2Config) -> AppResult<Self> {
        let region = Region::Custom {
            region: "auto".to_string(),
            endpoint: format!("https://{}.r2.cloudflarestorage.com", config.account_id),
        };

        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None, // security token
            None, // session token
            None, // profile
        )
        .map_err(|e| AppError::Storage(format!("R2 credentials error: {}", e)))?;

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Storage(format!("R2 bucket error: {}", e)))?;

        Ok(Self {
            bucket,
            bucket_name: config.bucket.clone(),
        })
    }
}

#[async_trait::async_trait]
impl StorageBackend for R2Backend {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String> {
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("R2 upload failed: {}", e)))?;

        if response.status_code() >= 300 {
            return Err(AppError::Storage(format!(
                "R2 upload failed with status {}",
                response.status_code()
            )));
        }

        tracing::info!(
            "R2 upload: bucket={}, key={}, size={}",
            self.bucket_name,
            key,
            data.len()
        );
        Ok(format!("r2://{}/{}", self.bucket_name, key))
    }

    async fn download(&self, key: &str) -> AppResult<Vec<u8>> {
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("R2 download failed: {}", e)))?;

        if response.status_code() == 404 {
            return Err(AppError::not_found("Screenshot object"));
        }

        tracing::debug!(
            "R2 download: bucket={}, key={}, size={}",
            self.bucket_name,
            key,
            response.bytes().len()
        );
        Ok(response.bytes().to_vec())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("R2 delete failed: {}", e)))?;

        tracing::info!("R2 delete: bucket={}, key={}", self.bucket_name, key);
        Ok(())
    }
}
