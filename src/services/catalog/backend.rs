//! Backend trait for the catalog store.
//!
//! Defines the capability set every catalog backend implements, so the
//! snapshot document and the relational table are interchangeable behind
//! [`CatalogStore`](super::CatalogStore).

use super::types::{Item, NewItem};
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for catalog persistence.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio, and
/// must serialize id assignment so concurrent adds never share an id.
///
/// # Example
///
/// ```ignore
/// use catalog::services::catalog::{CatalogBackend, SqliteBackend};
///
/// let backend = SqliteBackend::memory()?;
/// let item = backend.add(NewItem::new("Book", "Reading", image)).await?;
/// assert_eq!(backend.get(item.id).await?, Some(item));
/// ```
#[async_trait]
pub trait CatalogBackend: Send + Sync + 'static {
    /// Assigns the next id to `item`, persists it and returns the record.
    ///
    /// Ids start at 1 and strictly increase. A failed add must leave no
    /// trace: no record and no consumed id visible to later reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    async fn add(&self, item: NewItem) -> Result<Item>;

    /// Returns every record in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn list(&self) -> Result<Vec<Item>>;

    /// Returns the record with `id`, or `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, id: i64) -> Result<Option<Item>>;

    /// Returns the records whose name contains `keyword`, in id order.
    ///
    /// Matching is a literal substring test that ignores ASCII case. An
    /// empty result is `Ok(vec![])`; callers decide what that means.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn search(&self, keyword: &str) -> Result<Vec<Item>>;
}
