//! Where the config file lives, and writing a fresh one.

use std::path::{Path, PathBuf};

use mycoscope_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "mycoscope";
const FILE_NAME: &str = "config.toml";

/// `<os config dir>/mycoscope/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no OS config directory on this platform".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", target.display()))
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err("create", dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_err("write", path, e))
}
