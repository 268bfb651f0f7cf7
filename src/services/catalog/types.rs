//! Item records held by the catalog.

use serde::{Deserialize, Serialize};

use super::search::has_control_chars;
use crate::error::{Error, Result};
use crate::services::images::ImageRef;

/// A persisted catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned id, starting at 1 and never reused.
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Reference returned by a prior image store write.
    pub image: ImageRef,
}

/// An item that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image: ImageRef,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, image: ImageRef) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            image,
        }
    }

    /// Checks that `name` and `category` carry some text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.category)
    }

    pub(crate) fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            image: self.image,
        }
    }
}

/// Rejects blank item names and categories, and either one carrying a
/// control character.
pub(crate) fn validate_fields(name: &str, category: &str) -> Result<()> {
    for (field, value) in [("name", name), ("category", category)] {
        if value.trim().is_empty() {
            return Err(Error::invalid_argument(format!(
                "Item {field} cannot be empty"
            )));
        }
        if has_control_chars(value) {
            return Err(Error::invalid_argument(format!(
                "Item {field} cannot contain control characters"
            )));
        }
    }
    Ok(())
}
