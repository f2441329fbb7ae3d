//! Tests for error context helpers

use std::io;

use tether_domain::error::Error;
use tether_infrastructure::error_ext::ErrorContext;

fn failing() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
}

#[test]
fn test_io_context() {
    let error = failing().io_context("Failed to write config file").unwrap_err();
    assert!(matches!(error, Error::Io { .. }));
    assert_eq!(error.to_string(), "I/O error: Failed to write config file: denied");
}

#[test]
fn test_config_context_variants() {
    let error = failing().context("Failed to extract configuration").unwrap_err();
    assert!(matches!(error, Error::Configuration { source: Some(_), .. }));

    let error = failing()
        .with_context(|| format!("Failed to read {}", "tether.toml"))
        .unwrap_err();
    assert!(error.to_string().contains("Failed to read tether.toml: denied"));

    let error = failing().config_context("bad").unwrap_err();
    assert!(matches!(error, Error::Configuration { .. }));
}
