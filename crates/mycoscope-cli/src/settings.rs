//! Mapping from the file config and flags to client settings.

use std::path::Path;
use std::time::Duration;

use mycoscope_common::ConfigError;
use mycoscope_config::MycoscopeConfig;
use mycoscope_research::{ClientConfig, ResearchParams, WireFormat};

/// Load the explicit config file, or the default one.
///
/// A broken default config falls back to built-in defaults; a broken
/// explicit one is an error. Logging is not yet installed when this runs,
/// so the fallback reason is returned for the caller to log.
pub fn load(path: Option<&Path>) -> Result<(MycoscopeConfig, Option<ConfigError>), ConfigError> {
    match path {
        Some(path) => mycoscope_config::load_config_from(path).map(|c| (c, None)),
        None => match mycoscope_config::load_config() {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((MycoscopeConfig::default(), Some(e))),
        },
    }
}

pub fn client_config(config: &MycoscopeConfig, base_url: Option<&str>) -> ClientConfig {
    let wire_format = config
        .session
        .wire_format
        .parse::<WireFormat>()
        .unwrap_or_else(|e| {
            tracing::warn!("{e}, using envelope");
            WireFormat::Envelope
        });

    ClientConfig {
        base_url: base_url.unwrap_or(&config.backend.base_url).to_string(),
        keepalive_interval: Duration::from_secs(config.session.keepalive_interval.into()),
        connect_timeout: Duration::from_secs(config.session.connect_timeout.into()),
        transfer_timeout: Duration::from_secs(config.transfer.timeout.into()),
        wire_format,
        event_capacity: config.session.event_capacity as usize,
    }
}

/// Research parameters: config defaults, overridden by whatever flags were given.
pub fn research_params(
    config: &MycoscopeConfig,
    query: String,
    report_type: Option<String>,
    tone: Option<String>,
    sources: Vec<String>,
    filters: Vec<String>,
) -> ResearchParams {
    let defaults = &config.research;
    let pick = |given: Vec<String>, fallback: &Vec<String>| {
        if given.is_empty() {
            fallback.clone()
        } else {
            given
        }
    };

    ResearchParams::new(query)
        .with_report_type(report_type.unwrap_or_else(|| defaults.report_type.clone()))
        .with_tone(tone.unwrap_or_else(|| defaults.tone.clone()))
        .with_data_sources(pick(sources, &defaults.data_sources))
        .with_filters(pick(filters, &defaults.filters))
}

/// `RUST_LOG` wins, then `--log-level`, then the config.
pub fn log_directive<'a>(flag: Option<&'a str>, config: &'a MycoscopeConfig) -> &'a str {
    flag.unwrap_or(&config.logging.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_follows_file_config() {
        let mut config = MycoscopeConfig::default();
        config.session.keepalive_interval = 10;
        config.session.wire_format = "prefixed".into();

        let client = client_config(&config, None);
        assert_eq!(client.base_url, config.backend.base_url);
        assert_eq!(client.keepalive_interval, Duration::from_secs(10));
        assert_eq!(client.wire_format, WireFormat::Prefixed);
        assert_eq!(client.event_capacity, 256);
    }

    #[test]
    fn base_url_flag_overrides_config() {
        let client = client_config(&MycoscopeConfig::default(), Some("https://lab.example.org"));
        assert_eq!(client.base_url, "https://lab.example.org");
        assert_eq!(client.ws_url(), "wss://lab.example.org/ws");
    }

    #[test]
    fn unknown_wire_format_falls_back_to_envelope() {
        let mut config = MycoscopeConfig::default();
        config.session.wire_format = "carrier-pigeon".into();
        assert_eq!(client_config(&config, None).wire_format, WireFormat::Envelope);
    }

    #[test]
    fn research_flags_override_defaults() {
        let config = MycoscopeConfig::default();

        let params = research_params(&config, "morels".into(), None, None, vec![], vec![]);
        assert_eq!(params.report_type, config.research.report_type);
        assert_eq!(params.data_sources, config.research.data_sources);
        assert_eq!(params.filters, config.research.filters);

        let params = research_params(
            &config,
            "morels".into(),
            Some("detailed_report".into()),
            Some("analytical".into()),
            vec!["local".into()],
            vec!["medical".into()],
        );
        assert_eq!(params.report_type, "detailed_report");
        assert_eq!(params.tone, "analytical");
        assert_eq!(params.data_sources, vec!["local"]);
        assert_eq!(params.filters, vec!["medical"]);
    }

    #[test]
    fn log_flag_beats_config_level() {
        let config = MycoscopeConfig::default();
        assert_eq!(log_directive(Some("debug"), &config), "debug");
        assert_eq!(log_directive(None, &config), config.logging.level);
    }
}
