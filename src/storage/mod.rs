// Object storage for ticket screenshots

pub mod r2;

pub use r2::R2Backend;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Stores the bytes under `key` and returns the storage path.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String>;

    async fn download(&self, key: &str) -> AppResult<Vec<u8>>;

    async fn delete(&self, key: &str) -> AppResult<()>;
}
