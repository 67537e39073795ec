//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod backend;
mod helpers;
mod misc;
mod research;


use crate::schema::MycoscopeConfig;
use mycoscope_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MycoscopeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    backend::validate_backend(&mut errors, config);
    misc::validate_session(&mut errors, config);
    misc::validate_transfer(&mut errors, config);
    misc::validate_logging(&mut errors, config);
    research::validate_research(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
