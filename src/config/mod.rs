// Author: Dustin Pilgrim
// License: MIT

pub mod model;
pub mod parser;

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;
use tracing::debug;

pub use model::IdlegateConfig;

/// `~/.config/idlegate/idlegate.rune`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("idlegate").join("idlegate.rune"))
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/idlegate/idlegate.rune")
}

/// Loads `path` if given, else the first of user/system config that exists,
/// else built-in defaults.
pub fn load(path: Option<&Path>) -> Result<IdlegateConfig> {
    if let Some(path) = path {
        return load_from_path(path);
    }

    if let Some(user_path) = user_config_path() {
        if user_path.exists() {
            return load_from_path(&user_path);
        }
    }

    let system_path = system_config_path();
    if system_path.exists() {
        return load_from_path(&system_path);
    }

    debug!("no config file found; using defaults");
    Ok(IdlegateConfig::default())
}

pub fn load_from_path(path: &Path) -> Result<IdlegateConfig> {
    let config = RuneConfig::from_file(path)
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    let parsed = parser::parse_idlegate_config(&config)
        .wrap_err_with(|| format!("invalid config in {}", path.display()))?;

    debug!(path = %path.display(), "loaded config");
    Ok(parsed)
}
