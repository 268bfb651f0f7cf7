//! Backend trait for the image store.
//!
//! Backends only know how to keep flat, named objects. Hashing, naming and
//! the placeholder policy live in [`ImageStore`](super::ImageStore), so every
//! backend gets the same deduplication behavior.

use super::types::ImageRef;
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for image object storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
///
/// # Example
///
/// ```ignore
/// use catalog::services::images::{ImageBackend, MemoryImageBackend};
///
/// let backend = MemoryImageBackend::new();
/// let written = backend.put_if_absent(&image, &bytes).await?;
/// let data = backend.get(&image).await?;
/// ```
#[async_trait]
pub trait ImageBackend: Send + Sync + 'static {
    /// Writes `data` under `name` unless an object with that name exists.
    ///
    /// Returns `Ok(true)` if the object was written and `Ok(false)` if it
    /// already existed. A concurrent writer racing on the same name must
    /// never observe or produce a partially written object.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    async fn put_if_absent(&self, name: &ImageRef, data: &[u8]) -> Result<bool>;

    /// Reads the object stored under `name`.
    ///
    /// Returns `Ok(None)` if no such object exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the object exists but cannot be read.
    async fn get(&self, name: &ImageRef) -> Result<Option<Vec<u8>>>;

    /// Checks whether an object exists under `name`.
    ///
    /// Default implementation uses `get()`, but backends may override
    /// for efficiency.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn exists(&self, name: &ImageRef) -> Result<bool> {
        Ok(self.get(name).await?.is_some())
    }
}
