//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Mycoscope Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[backend]
base_url = "http://localhost:8000"   # WebSocket endpoint is <base_url>/ws

[session]
# keepalive_interval = 30   # seconds, 1-3600
# connect_timeout = 15      # seconds, 1-120
# wire_format = "envelope"  # envelope, prefixed
# event_capacity = 256      # 16-65536

[transfer]
# timeout = 300             # seconds, 1-3600

[research]
# report_type = "research_report"
# tone = "objective"
# data_sources = ["pubmed", "arxiv", "web"]   # add "local" for hybrid reports
# filters = ["mycology"]                      # mycology, microbiology, medical

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
    .to_string()
}
