//! Filesystem-backed image backend.
//!
//! Objects live as flat files directly under the images directory. New
//! objects are written to a temporary file in the same directory and moved
//! into place with a no-clobber rename, so readers never see a partial image
//! and two writers racing on the same name produce exactly one object.

use super::backend::ImageBackend;
use super::types::ImageRef;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filesystem-backed image backend.
///
/// `FilesystemImageBackend` is `Clone` and can be shared across threads; the
/// filesystem's atomic rename provides the create-if-absent guarantee.
#[derive(Debug, Clone)]
pub struct FilesystemImageBackend {
    base_dir: PathBuf,
}

impl FilesystemImageBackend {
    /// Opens the backend at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create images directory: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    /// Returns the directory holding the image objects.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn object_path(&self, name: &ImageRef) -> PathBuf {
        self.base_dir.join(name.as_str())
    }

    fn put_if_absent_sync(&self, name: &ImageRef, data: &[u8]) -> Result<bool> {
        let path = self.object_path(name);
        if path
            .try_exists()
            .with_context(|| format!("Failed to check image: {name}"))?
        {
            return Ok(false);
        }

        let mut tmp = NamedTempFile::new_in(&self.base_dir)
            .with_context(|| format!("Failed to create temporary file for image: {name}"))?;
        tmp.write_all(data)
            .with_context(|| format!("Failed to write image: {name}"))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to flush image: {name}"))?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(true),
            // Another writer stored the same content first
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => {
                Err(anyhow::Error::new(e.error).context(format!("Failed to store image: {name}")))
            },
        }
    }

    fn get_sync(&self, name: &ImageRef) -> Result<Option<Vec<u8>>> {
        match fs::read(self.object_path(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to read image: {name}"))),
        }
    }
}

#[async_trait]
impl ImageBackend for FilesystemImageBackend {
    async fn put_if_absent(&self, name: &ImageRef, data: &[u8]) -> Result<bool> {
        let backend = self.clone();
        let name = name.clone();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || backend.put_if_absent_sync(&name, &data))
            .await
            .context("Task join error")?
    }

    async fn get(&self, name: &ImageRef) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let name = name.clone();
        tokio::task::spawn_blocking(move || backend.get_sync(&name))
            .await
            .context("Task join error")?
    }

    async fn exists(&self, name: &ImageRef) -> Result<bool> {
        let path = self.object_path(name);
        tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check image: {name}"))
    }
}
