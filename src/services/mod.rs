//! Storage services behind the catalog.
//!
//! - [`images`] - content-addressed image objects
//! - [`catalog`] - item records (snapshot document or SQLite table)

pub mod catalog;
pub mod images;
