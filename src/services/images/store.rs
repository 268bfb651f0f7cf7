//! High-level `ImageStore` wrapper over backend implementations.
//!
//! Owns the two policies every backend shares: content addressing on write
//! and placeholder substitution on read.

use super::backend::ImageBackend;
use super::digest::image_ref_for;
use super::filesystem::FilesystemImageBackend;
use super::memory::MemoryImageBackend;
use super::types::{ImageData, ImageRef, PLACEHOLDER_IMAGE};
use crate::error::{Error, Result};
use anyhow::anyhow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Content-addressed image store.
///
/// `ImageStore` is `Clone` and can be shared across request tasks. Writes to
/// the same content-derived name are idempotent, so no extra locking is
/// needed here.
///
/// # Example
///
/// ```ignore
/// use catalog::services::images::ImageStore;
///
/// let images = ImageStore::file("images")?;
/// let reference = images.put(&upload).await?;
/// let served = images.get(reference.as_str()).await?;
/// ```
#[derive(Clone)]
pub struct ImageStore {
    backend: Arc<dyn ImageBackend>,
}

impl ImageStore {
    /// Creates an `ImageStore` over a directory on the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the directory cannot be created.
    pub fn file<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let backend = FilesystemImageBackend::open(dir).map_err(Error::startup)?;
        Ok(Self::custom(backend))
    }

    /// Creates an `ImageStore` that keeps objects in memory.
    pub fn memory() -> Self {
        Self::custom(MemoryImageBackend::new())
    }

    /// Creates an `ImageStore` with a custom backend.
    pub fn custom<B: ImageBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Stores `bytes` under their content-derived name.
    ///
    /// The whole payload is hashed first, then written verbatim if no object
    /// with that name exists. Storing identical bytes again performs no
    /// write and returns the same reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backend write fails.
    pub async fn put(&self, bytes: &[u8]) -> Result<ImageRef> {
        let reference = image_ref_for(bytes);
        let written = self.backend.put_if_absent(&reference, bytes).await?;
        if written {
            debug!(image = %reference, size = bytes.len(), "Stored new image");
        } else {
            debug!(image = %reference, "Image already stored, skipping write");
        }
        Ok(reference)
    }

    /// Reads the image named `name`, substituting the placeholder if absent.
    ///
    /// Missing images are not an error: the placeholder object is served
    /// instead and [`ImageData::fallback`] is set.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `name` is not a valid image reference
    ///   (checked before any backend access)
    /// - [`Error::Storage`] if a read fails or the placeholder itself is missing
    pub async fn get(&self, name: &str) -> Result<ImageData> {
        let reference = ImageRef::parse(name).inspect_err(|e| {
            warn!(image = %name, error = %e, "Rejected image reference");
        })?;

        if let Some(bytes) = self.backend.get(&reference).await? {
            return Ok(ImageData {
                reference,
                bytes,
                fallback: false,
            });
        }

        debug!(image = %reference, "Image not found, serving placeholder");
        let placeholder = ImageRef::placeholder();
        let bytes = self
            .backend
            .get(&placeholder)
            .await?
            .ok_or_else(|| anyhow!("Placeholder image {PLACEHOLDER_IMAGE} is missing"))?;

        Ok(ImageData {
            reference: placeholder,
            bytes,
            fallback: true,
        })
    }

    /// Returns true if the placeholder object is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backend check fails.
    pub async fn has_placeholder(&self) -> Result<bool> {
        Ok(self.backend.exists(&ImageRef::placeholder()).await?)
    }
}
