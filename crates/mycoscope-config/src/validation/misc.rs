//! Validation for the session, transfer, and logging sections.

use crate::schema::MycoscopeConfig;

use super::helpers::{validate_one_of, validate_range};

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &MycoscopeConfig) {
    validate_range(
        errors,
        "session.keepalive_interval",
        config.session.keepalive_interval,
        1,
        3600,
    );
    validate_range(
        errors,
        "session.connect_timeout",
        config.session.connect_timeout,
        1,
        120,
    );
    validate_range(
        errors,
        "session.event_capacity",
        config.session.event_capacity,
        16,
        65536,
    );
    validate_one_of(
        errors,
        "session.wire_format",
        &config.session.wire_format,
        &["envelope", "prefixed"],
    );
}

pub(crate) fn validate_transfer(errors: &mut Vec<String>, config: &MycoscopeConfig) {
    validate_range(errors, "transfer.timeout", config.transfer.timeout, 1, 3600);
}

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &MycoscopeConfig) {
    validate_one_of(
        errors,
        "logging.level",
        &config.logging.level.to_ascii_lowercase(),
        &["trace", "debug", "info", "warn", "error"],
    );
}
