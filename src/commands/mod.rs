//! CLI command implementations for the catalog binary.
//!
//! - [`serve`] - Open storage and run the HTTP server
//! - [`check`] - Validate configuration and storage without serving

pub mod check;
pub mod serve;

use anyhow::Result;
use tracing::warn;

use crate::config::Config;

/// Validates `config` and logs every non-fatal warning.
pub(crate) fn validate_and_warn(config: &Config) -> Result<()> {
    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }
    Ok(())
}
