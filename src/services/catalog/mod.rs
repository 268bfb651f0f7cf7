//! Catalog persistence with interchangeable backends.
//!
//! Both backends satisfy the same contract: ids start at 1 and strictly
//! increase, records are immutable once added, and keyword search is a
//! literal, ASCII case-insensitive substring match on the item name.
//!
//! - **SnapshotBackend**: whole catalog in memory, one JSON document rewritten per add
//! - **SqliteBackend**: one `items` table, ids from the `AUTOINCREMENT` key
//!
//! # Example
//!
//! ```ignore
//! use catalog::services::catalog::{CatalogStore, NewItem};
//!
//! // Flat-file snapshot
//! let store = CatalogStore::snapshot("items.json")?;
//!
//! // Relational table
//! let store = CatalogStore::sqlite("db/mercari.sqlite3")?;
//!
//! let item = store.add(NewItem::new("Book", "Reading", image)).await?;
//! assert_eq!(store.get(item.id).await?, item);
//! ```
//!
//! # Custom Backends
//!
//! Implement the `CatalogBackend` trait to use custom storage:
//!
//! ```ignore
//! struct PostgresBackend { /* ... */ }
//! impl CatalogBackend for PostgresBackend { /* ... */ }
//!
//! let store = CatalogStore::custom(PostgresBackend::new());
//! ```

mod backend;
mod search;
mod snapshot;
mod sqlite;
mod store;
mod types;

#[cfg(test)]
mod tests;

// Re-export the public API
pub use backend::CatalogBackend;
pub use snapshot::SnapshotBackend;
pub use sqlite::SqliteBackend;
pub use store::CatalogStore;
pub use types::{Item, NewItem};

pub(crate) use types::validate_fields;
