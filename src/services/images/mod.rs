//! Content-addressed image store with pluggable backends.
//!
//! Every image is named after the SHA-256 digest of its bytes plus a `.jpg`
//! suffix, so repeated uploads of the same content map to one object and one
//! physical write. Reads of a missing (but well-formed) name fall back to the
//! `default.jpg` placeholder.
//!
//! Backends:
//!
//! - **FilesystemImageBackend**: flat files in the images directory (default)
//! - **MemoryImageBackend**: non-persistent, counts writes (testing/embedding)
//!
//! # Example
//!
//! ```ignore
//! use catalog::services::images::ImageStore;
//!
//! let images = ImageStore::file("images")?;
//! let reference = images.put(&upload).await?;  // "<sha256>.jpg"
//! let image = images.get("missing.jpg").await?; // placeholder bytes
//! assert!(image.fallback);
//! ```

mod backend;
mod digest;
mod filesystem;
mod memory;
mod store;
mod types;

// Re-export the public API
pub use backend::ImageBackend;
pub use digest::{content_digest, image_ref_for};
pub use filesystem::FilesystemImageBackend;
pub use memory::MemoryImageBackend;
pub use store::ImageStore;
pub use types::{IMAGE_EXTENSION, ImageData, ImageRef, PLACEHOLDER_IMAGE};
