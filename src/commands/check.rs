//! `catalog check` - validate configuration and open storage once.

use anyhow::Result;
use std::path::Path;

use super::validate_and_warn;
use crate::config::Config;
use crate::service::CatalogService;
use crate::telemetry;

/// Execute `catalog check`.
///
/// Opening the service creates missing directories and initializes the
/// catalog schema or document, so a successful check leaves storage ready.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    telemetry::init(config.log.format);

    validate_and_warn(&config)?;
    let service = CatalogService::open(&config.storage).await?;
    let count = service.list_items().await?.len();

    println!("Configuration OK: {}", config_path.display());
    println!("  backend: {:?}", config.storage.backend);
    println!("  items:   {count}");
    println!("  listen:  {}", config.bind_addr());
    Ok(())
}
