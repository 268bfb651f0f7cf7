//! In-memory image backend.
//!
//! Non-persistent object storage using DashMap for concurrent access. Used
//! for tests and embedding, and counts physical writes so deduplication can
//! be observed directly.

use super::backend::ImageBackend;
use super::types::ImageRef;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory image backend.
///
/// `MemoryImageBackend` is `Clone`; clones share the same objects and the
/// same write counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageBackend {
    objects: Arc<DashMap<String, Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryImageBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no object is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ImageBackend for MemoryImageBackend {
    async fn put_if_absent(&self, name: &ImageRef, data: &[u8]) -> Result<bool> {
        match self.objects.entry(name.as_str().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(data.to_vec());
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            },
        }
    }

    async fn get(&self, name: &ImageRef) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.get(name.as_str()).map(|data| data.clone()))
    }

    async fn exists(&self, name: &ImageRef) -> Result<bool> {
        Ok(self.objects.contains_key(name.as_str()))
    }
}
