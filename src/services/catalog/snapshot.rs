//! Snapshot catalog backend.
//!
//! Keeps the whole catalog in memory and rewrites one JSON document on every
//! add. The document is a bare array of items; a `{"items": [...]}` wrapper
//! is accepted on load as well.
//!
//! Adds are serialized by a writer lock that covers id assignment and the
//! document rewrite. The item list has its own lock, taken only to copy the
//! list or to publish a record whose document write already succeeded, so
//! readers never wait on disk I/O. The rewrite goes through a temporary file
//! plus rename, so a half-written document is never visible and a failed
//! write leaves memory unchanged.

use super::backend::CatalogBackend;
use super::search::name_matches;
use super::types::{Item, NewItem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::debug;

/// On-disk shapes accepted when loading a snapshot.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Items(Vec<Item>),
    Wrapped { items: Vec<Item> },
}

impl SnapshotDocument {
    fn into_items(self) -> Vec<Item> {
        match self {
            Self::Items(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Flat-file JSON snapshot backend.
///
/// `SnapshotBackend` is `Clone`; clones share the same in-memory catalog and
/// the same writer lock.
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    path: PathBuf,
    items: Arc<Mutex<Vec<Item>>>,
    writer: Arc<Mutex<()>>,
}

impl SnapshotBackend {
    /// Opens the snapshot at `path`, loading it fully.
    ///
    /// A missing document means an empty catalog. The parent directory is
    /// created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The document exists but cannot be read
    /// - The document cannot be decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory: {}", parent.display())
            })?;
        }

        let items = load_document(&path)?;
        debug!(path = %path.display(), count = items.len(), "Loaded catalog snapshot");

        Ok(Self {
            path,
            items: Arc::new(Mutex::new(items)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn add_sync(&self, item: NewItem) -> Result<Item> {
        let _writer = self.writer.lock();

        let mut next = self.items.lock().clone();
        let id = next.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let item = item.with_id(id);
        next.push(item.clone());

        write_document(&self.path, &next)?;

        // Only this writer mutates the list, so `next` is still current
        *self.items.lock() = next;
        Ok(item)
    }
}

/// Reads and decodes the snapshot document, if any.
fn load_document(path: &Path) -> Result<Vec<Item>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to read catalog snapshot: {}", path.display())));
        },
    };

    let document: SnapshotDocument = serde_json::from_slice(&data)
        .with_context(|| format!("Failed to decode catalog snapshot: {}", path.display()))?;
    Ok(document.into_items())
}

/// Atomically replaces the snapshot document with `items`.
fn write_document(path: &Path, items: &[Item]) -> Result<()> {
    let data = serde_json::to_vec(items).context("Failed to serialize catalog snapshot")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file for catalog snapshot")?;
    tmp.write_all(&data)
        .context("Failed to write catalog snapshot")?;
    tmp.as_file()
        .sync_all()
        .context("Failed to flush catalog snapshot")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace catalog snapshot: {}", path.display()))?;

    Ok(())
}

#[async_trait]
impl CatalogBackend for SnapshotBackend {
    async fn add(&self, item: NewItem) -> Result<Item> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.add_sync(item))
            .await
            .context("Task join error")?
    }

    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.items.lock().clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        Ok(self.items.lock().iter().find(|item| item.id == id).cloned())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        Ok(self
            .items
            .lock()
            .iter()
            .filter(|item| name_matches(&item.name, keyword))
            .cloned()
            .collect())
    }
}
