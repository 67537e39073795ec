//! Reading `config.toml` into a [`MycoscopeConfig`].

use std::io::ErrorKind;
use std::path::Path;

use mycoscope_common::ConfigError;
use tracing::{debug, info, warn};

use crate::schema::MycoscopeConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Parse the file at `path`. Missing keys take their defaults.
///
/// Out-of-range values only produce a warning here; callers that need a
/// valid config run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<MycoscopeConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let config = parse(&text, path)?;
    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has invalid values: {e}");
    }
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn parse(text: &str, path: &Path) -> Result<MycoscopeConfig, ConfigError> {
    toml::from_str(text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))
}

/// Load `<config_dir>/mycoscope/config.toml`, writing the documented
/// template there on first run.
pub fn load_default() -> Result<MycoscopeConfig, ConfigError> {
    let path = default_config_path()?;
    load_from_path(&path).or_else(|e| match e {
        ConfigError::FileNotFound(_) => {
            info!(path = %path.display(), "first run, writing default config");
            create_default_config(&path)?;
            Ok(MycoscopeConfig::default())
        }
        other => Err(other),
    })
}
