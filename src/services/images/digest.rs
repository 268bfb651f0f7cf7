//! Content digests for image references.

use sha2::{Digest, Sha256};

use super::types::ImageRef;

/// Computes the lowercase hex SHA-256 digest of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Derives the canonical image reference for `bytes`.
pub fn image_ref_for(bytes: &[u8]) -> ImageRef {
    ImageRef::from_digest(&content_digest(bytes))
}
