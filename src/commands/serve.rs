//! `catalog serve` - run the HTTP API.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::validate_and_warn;
use crate::config::{BackendKind, Config};
use crate::http;
use crate::service::CatalogService;
use crate::telemetry;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub port: Option<u16>,
    pub backend: Option<BackendKind>,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
    }
}

/// Execute `catalog serve`.
pub async fn execute(config_path: &Path, overrides: Overrides) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;
    telemetry::init(config.log.format);

    overrides.apply(&mut config);
    validate_and_warn(&config)?;

    let service = CatalogService::open(&config.storage).await?;
    let router = http::router(service, &config.server)?;

    info!(
        front_url = %config.server.front_url,
        backend = ?config.storage.backend,
        "Starting catalog server"
    );
    http::serve(router, &config.bind_addr()).await
}
