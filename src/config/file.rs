//! Saving run configurations as YAML.
//!
//! `run --config-file PATH` writes the assembled [`RunConfig`] here instead of
//! handing it to the engine, so the same validation can be replayed later.

use super::types::RunConfig;
use crate::error::{DataValidationError, ErrorContext, Result};
use std::path::Path;

/// Header written at the top of every saved config.
const CONFIG_FILE_HEADER: &str = "# Data validation run configuration\n\
# Generated by `data-validation run --config-file`\n\n";

/// Render a run config as commented YAML.
pub fn render_config_file(config: &RunConfig) -> Result<String> {
    let yaml = serde_yaml::to_string(config).context("rendering run config as YAML")?;
    Ok(format!("{CONFIG_FILE_HEADER}{yaml}"))
}

/// Write a run config to `path`, creating parent directories as needed.
pub fn write_config_file(path: &Path, config: &RunConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DataValidationError::io(parent, e))?;
        }
    }

    let content = render_config_file(config)?;
    std::fs::write(path, content).map_err(|e| DataValidationError::io(path, e))?;
    tracing::debug!("wrote run config to {}", path.display());
    Ok(())
}
