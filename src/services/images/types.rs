//! Types and constants for the image store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Suffix appended to every content-derived image name.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Well-known object served in place of a missing image.
pub const PLACEHOLDER_IMAGE: &str = "default.jpg";

/// Reference to a stored image: `<lowercase-hex-digest>.jpg`.
///
/// References produced by the store are always content-derived. References
/// coming from callers go through [`ImageRef::parse`], which only accepts a
/// single flat file name ending in `.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Builds the canonical reference for a hex-encoded digest.
    pub(crate) fn from_digest(hex_digest: &str) -> Self {
        Self(format!("{hex_digest}{IMAGE_EXTENSION}"))
    }

    /// Wraps a reference read back from a catalog backing store.
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }

    /// Reference to the placeholder object.
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_IMAGE.to_string())
    }

    /// Validates a caller-supplied image file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name:
    /// - does not end with `.jpg`
    /// - has nothing before the suffix
    /// - contains a path separator, a `..` sequence or a NUL byte
    pub fn parse(name: &str) -> Result<Self> {
        let Some(stem) = name.strip_suffix(IMAGE_EXTENSION) else {
            return Err(Error::invalid_argument(
                "Image path does not end with .jpg",
            ));
        };
        if stem.is_empty() {
            return Err(Error::invalid_argument("Image name is empty"));
        }
        if name.contains(&['/', '\\', '\0'][..]) || name.contains("..") {
            return Err(Error::invalid_argument(
                "Image name must be a plain file name",
            ));
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the reference as a file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this reference names the placeholder object.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_IMAGE
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Image bytes returned by a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Object actually served (the placeholder when the request missed).
    pub reference: ImageRef,
    /// Raw object bytes.
    pub bytes: Vec<u8>,
    /// True when the requested object was absent and the placeholder was substituted.
    pub fallback: bool,
}
