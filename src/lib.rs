//! Marketplace item catalog: a small HTTP API over a content-addressed
//! image store and a pluggable item store.
//!
//! - [`services::images`] - images named by the SHA-256 of their bytes
//! - [`services::catalog`] - item records in a JSON snapshot or SQLite
//! - [`service`] - add/list/get/search orchestration
//! - [`http`] - axum router and server
//! - [`config`] - `catalog.toml` loading and validation

#![deny(unsafe_code)]

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod services;
pub mod telemetry;

pub use error::{Error, Result};
pub use service::CatalogService;
