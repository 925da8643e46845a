//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::Path;

use tracing::debug;

use kontrakt_core::KontraktConfig;

/// Load the configuration: explicit `--config`, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KontraktConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(KontraktConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(KontraktConfig::from_file(&default_path)?)
    } else {
        Ok(KontraktConfig::default())
    }
}
