use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MycoscopeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("transfer error: {0}")]
    Transfer(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("session.keepalive_interval = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: session.keepalive_interval = 0"
        );
    }

    #[test]
    fn mycoscope_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: MycoscopeError = config_err.into();
        assert!(matches!(err, MycoscopeError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn mycoscope_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MycoscopeError = io_err.into();
        assert!(matches!(err, MycoscopeError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn mycoscope_error_other_variants() {
        let err = MycoscopeError::Session("connection refused".into());
        assert_eq!(err.to_string(), "session error: connection refused");

        let err = MycoscopeError::Transfer("upload failed: Not Found".into());
        assert_eq!(err.to_string(), "transfer error: upload failed: Not Found");

        let err = MycoscopeError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
