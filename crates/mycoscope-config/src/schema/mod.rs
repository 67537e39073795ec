//! Configuration schema types for Mycoscope.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the research backend expects.

mod backend;
mod logging;
mod research;
mod session;
mod transfer;

pub use backend::*;
pub use logging::*;
pub use research::*;
pub use session::*;
pub use transfer::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Mycoscope.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MycoscopeConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub transfer: TransferConfig,
    pub research: ResearchDefaultsConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: MycoscopeConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.session.keepalive_interval, 30);
        assert_eq!(config.session.connect_timeout, 15);
        assert_eq!(config.session.wire_format, "envelope");
        assert_eq!(config.transfer.timeout, 300);
        assert_eq!(config.research.report_type, "research_report");
        assert_eq!(config.research.tone, "objective");
        assert_eq!(config.research.data_sources, vec!["pubmed", "arxiv", "web"]);
        assert_eq!(config.research.filters, vec!["mycology"]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let config: MycoscopeConfig = toml::from_str(
            r#"
[session]
keepalive_interval = 10
"#,
        )
        .unwrap();
        assert_eq!(config.session.keepalive_interval, 10);
        assert_eq!(config.session.connect_timeout, 15);
        assert_eq!(config.session.event_capacity, 256);
    }
}
