pub mod config;
pub mod place;
pub mod reconstruct;

use gridcast_core::config::builtin;
use gridcast_core::config::schema::LayoutConfig;
use gridcast_core::error::GridError;
use std::path::{Path, PathBuf};

/// Custom config file wins over a preset; with neither, `default_preset` is used.
pub fn resolve_config(
    config: Option<PathBuf>,
    preset: Option<String>,
    default_preset: &str,
) -> Result<LayoutConfig, GridError> {
    let config = match (config, preset) {
        (Some(path), _) => gridcast_core::config::load_config(&path)?,
        (None, Some(name)) => builtin::load_preset(&name)?,
        (None, None) => builtin::load_preset(default_preset)?,
    };
    tracing::debug!(name = %config.name, "using layout config");
    Ok(config)
}

pub fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
