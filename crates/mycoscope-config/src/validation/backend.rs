use crate::schema::MycoscopeConfig;

const SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

/// The base URL must be non-empty and, if it names a scheme, a supported one.
pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &MycoscopeConfig) {
    let url = config.backend.base_url.trim();
    if url.is_empty() {
        errors.push("backend.base_url must not be empty".to_string());
        return;
    }
    if let Some((scheme, rest)) = url.split_once("://") {
        if !SCHEMES.contains(&scheme) {
            errors.push(format!("backend.base_url has unsupported scheme \"{scheme}\""));
        }
        if rest.is_empty() {
            errors.push("backend.base_url has no host".to_string());
        }
    }
}
