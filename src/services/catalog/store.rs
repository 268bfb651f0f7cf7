//! High-level `CatalogStore` wrapper over backend implementations.
//!
//! Applies the lookup contract shared by every backend: a missing id and a
//! search without matches are `NotFound`, an empty keyword is rejected.

use super::backend::CatalogBackend;
use super::search::validate_keyword;
use super::snapshot::SnapshotBackend;
use super::sqlite::SqliteBackend;
use super::types::{Item, NewItem};
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Catalog persistence with an interchangeable backend.
///
/// `CatalogStore` is `Clone` and can be shared across request tasks; each
/// backend serializes its own writers.
///
/// # Example
///
/// ```ignore
/// use catalog::services::catalog::CatalogStore;
///
/// let store = CatalogStore::snapshot("items.json")?;
/// let item = store.add(NewItem::new("Book", "Reading", image)).await?;
/// let hits = store.search("Bo").await?;
/// ```
#[derive(Clone)]
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
}

impl CatalogStore {
    /// Creates a `CatalogStore` over a JSON snapshot document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the document exists but cannot be loaded.
    pub fn snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = SnapshotBackend::open(path).map_err(Error::startup)?;
        Ok(Self::custom(backend))
    }

    /// Creates a `CatalogStore` over a SQLite database file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the database or its schema cannot be
    /// initialized.
    pub fn sqlite<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = SqliteBackend::open(path).map_err(Error::startup)?;
        Ok(Self::custom(backend))
    }

    /// Creates a `CatalogStore` over a private in-memory SQLite database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if the database cannot be created.
    pub fn sqlite_memory() -> Result<Self> {
        let backend = SqliteBackend::memory().map_err(Error::startup)?;
        Ok(Self::custom(backend))
    }

    /// Creates a `CatalogStore` with a custom backend.
    pub fn custom<B: CatalogBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Persists `item` under the next id.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the name or category is blank
    /// - [`Error::Storage`] if the record cannot be persisted
    pub async fn add(&self, item: NewItem) -> Result<Item> {
        item.validate()?;
        Ok(self.backend.add(item).await?)
    }

    /// Returns every record. Never fails on an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backing store cannot be read.
    pub async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.backend.list().await?)
    }

    /// Looks up the record with `id`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no record has that id
    /// - [`Error::Storage`] if the backing store cannot be read
    pub async fn get(&self, id: i64) -> Result<Item> {
        self.backend
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Item {id} not found")))
    }

    /// Returns the records whose name contains `keyword`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `keyword` is empty or contains a
    ///   control character
    /// - [`Error::NotFound`] if nothing matches
    /// - [`Error::Storage`] if the backing store cannot be read
    pub async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        validate_keyword(keyword)?;

        let items = self.backend.search(keyword).await?;
        if items.is_empty() {
            return Err(Error::not_found(format!(
                "No items match keyword '{keyword}'"
            )));
        }
        Ok(items)
    }
}
