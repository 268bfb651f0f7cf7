//! SQLite catalog backend.
//!
//! Records live in a single `items` table. Ids come from the
//! `AUTOINCREMENT` primary key, so they are never reused, and every query
//! binds caller input as parameters.

use super::backend::CatalogBackend;
use super::search::like_pattern;
use super::types::{Item, NewItem};
use crate::services::images::ImageRef;
use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Schema applied at open. Idempotent.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    image TEXT
);
";

const SELECT_ITEMS: &str = "SELECT id, name, category, image FROM items";

/// SQLite-backed catalog backend.
///
/// The connection sits behind a mutex; SQLite serializes writers on its own,
/// the mutex only makes the connection shareable across tasks.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Opens (or creates) the database file at `path` and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The database cannot be opened
    /// - The schema cannot be applied
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open catalog database: {}", path.display()))?;
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize items table")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || f(&conn.lock()))
            .await
            .context("Task join error")?
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let image: Option<String> = row.get(3)?;
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        // Rows without an image resolve to the placeholder when served
        image: image.map_or_else(ImageRef::placeholder, ImageRef::from_stored),
    })
}

fn query_items(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Item>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .with_context(|| format!("Failed to prepare query: {sql}"))?;
    let rows = stmt
        .query_map(params, row_to_item)
        .context("Failed to query items")?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read item row")
}

#[async_trait]
impl CatalogBackend for SqliteBackend {
    async fn add(&self, item: NewItem) -> Result<Item> {
        self.with_conn(move |conn| {
            let id: i64 = conn
                .query_row(
                    "INSERT INTO items (name, category, image) VALUES (?1, ?2, ?3) RETURNING id",
                    params![item.name, item.category, item.image.as_str()],
                    |row| row.get(0),
                )
                .context("Failed to insert item")?;
            Ok(item.with_id(id))
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Item>> {
        self.with_conn(|conn| query_items(conn, &format!("{SELECT_ITEMS} ORDER BY id"), params![]))
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("{SELECT_ITEMS} WHERE id = ?1"),
                params![id],
                row_to_item,
            )
            .optional()
            .with_context(|| format!("Failed to query item {id}"))
        })
        .await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        let pattern = like_pattern(keyword);
        self.with_conn(move |conn| {
            query_items(
                conn,
                &format!("{SELECT_ITEMS} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id"),
                params![pattern],
            )
        })
        .await
    }
}
