//! Catalog service: orchestrates the image store and the catalog store.
//!
//! An add always writes the image first and the catalog record second. If the
//! record write fails the image stays behind; it is content-addressed, so a
//! later identical upload simply reuses it.

use tracing::{info, warn};

use crate::config::{BackendKind, StorageConfig};
use crate::error::{Error, Result};
use crate::services::catalog::{CatalogStore, Item, NewItem, validate_fields};
use crate::services::images::{ImageData, ImageStore};

/// The catalog service.
///
/// `CatalogService` is `Clone`; clones share both stores, so one instance can
/// serve every request task.
#[derive(Clone)]
pub struct CatalogService {
    images: ImageStore,
    catalog: CatalogStore,
}

impl CatalogService {
    /// Builds a service from already opened stores.
    pub fn new(images: ImageStore, catalog: CatalogStore) -> Self {
        Self { images, catalog }
    }

    /// Opens both stores as described by `storage`.
    ///
    /// The catalog backend is fully loaded (snapshot) or its schema ensured
    /// (SQLite) before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] if either store cannot be initialized.
    pub async fn open(storage: &StorageConfig) -> Result<Self> {
        let images = ImageStore::file(&storage.images_dir)?;
        let catalog = match storage.backend {
            BackendKind::Snapshot => CatalogStore::snapshot(&storage.snapshot_path)?,
            BackendKind::Sqlite => CatalogStore::sqlite(&storage.database_path)?,
        };

        let has_placeholder = images.has_placeholder().await.map_err(|e| match e {
            Error::Storage(source) => Error::Startup(source),
            other => other,
        })?;
        if !has_placeholder {
            warn!(
                images_dir = %storage.images_dir.display(),
                "Placeholder image default.jpg is missing; requests for unknown images will fail"
            );
        }

        info!(backend = ?storage.backend, "Catalog storage ready");
        Ok(Self::new(images, catalog))
    }

    /// Adds an item: stores the image, then persists the record.
    ///
    /// Field validation happens before anything is written. The catalog write
    /// is only attempted after the image write succeeded.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `name` or `category` is blank
    /// - [`Error::Storage`] if either write fails; no item is returned and an
    ///   already stored image is left in place
    pub async fn add_item(&self, name: &str, category: &str, image: &[u8]) -> Result<Item> {
        validate_fields(name, category)?;

        let reference = self.images.put(image).await?;
        let item = self
            .catalog
            .add(NewItem::new(name, category, reference))
            .await?;

        info!(id = item.id, name = %item.name, image = %item.image, "Item added");
        Ok(item)
    }

    /// Returns every item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the catalog cannot be read.
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        self.catalog.list().await
    }

    /// Returns the item with `id`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if there is no such item
    /// - [`Error::Storage`] if the catalog cannot be read
    pub async fn get_item(&self, id: i64) -> Result<Item> {
        self.catalog.get(id).await
    }

    /// Parses a textual id and returns that item.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `id` is not an integer
    /// - otherwise as [`CatalogService::get_item`]
    pub async fn get_item_by_str(&self, id: &str) -> Result<Item> {
        let id = id
            .parse::<i64>()
            .map_err(|_| Error::invalid_argument("Invalid item ID"))?;
        self.get_item(id).await
    }

    /// Returns the items whose name contains `keyword`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `keyword` is empty
    /// - [`Error::NotFound`] if nothing matches
    /// - [`Error::Storage`] if the catalog cannot be read
    pub async fn search_items(&self, keyword: &str) -> Result<Vec<Item>> {
        self.catalog.search(keyword).await
    }

    /// Returns the image named `filename`, or the placeholder if absent.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `filename` is not a valid image name
    /// - [`Error::Storage`] if the read fails or the placeholder is missing
    pub async fn image(&self, filename: &str) -> Result<ImageData> {
        self.images.get(filename).await
    }
}
