//! Configuration loading from files

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use tether_infrastructure::config::types::ResolutionConfig;
use tether_infrastructure::config::{ConfigBuilder, ConfigLoader};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("missing.toml"))
        .with_env_prefix("TETHER_LOADER_DEFAULTS")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "info");
    assert!(config.container.definitions.is_empty());
    assert_eq!(config.container.resolution, ResolutionConfig::default());
    assert!(config.container.resolution.detect_cycles);
    assert_eq!(config.container.resolution.max_depth, 256);
}

#[test]
fn test_file_values_override_defaults() {
    let file = write_config(
        r#"
[logging]
level = "debug"

[container.definitions]
mailer = "SmtpMailer"
notify = "Notifier::send"

[container.resolution]
detect_cycles = false
max_depth = 32
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("TETHER_LOADER_FILE")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.container.definitions["mailer"], "SmtpMailer");
    assert_eq!(config.container.definitions["notify"], "Notifier::send");
    assert!(!config.container.resolution.detect_cycles);
    assert_eq!(config.container.resolution.max_depth, 32);
    assert!(config.container.resolution.cache_resolvers);
}

#[test]
fn test_validation_rejects_zero_depth() {
    let file = write_config("[container.resolution]\nmax_depth = 0\n");
    let error = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("TETHER_LOADER_DEPTH")
        .load()
        .unwrap_err();
    assert!(error.to_string().contains("Maximum resolution depth cannot be 0"));
}

#[test]
fn test_validation_rejects_empty_sources_and_bad_levels() {
    let file = write_config("[container.definitions]\nmailer = \"  \"\n");
    let error = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("TETHER_LOADER_EMPTY")
        .load()
        .unwrap_err();
    assert!(error.to_string().contains("Definition source for `mailer` cannot be empty"));

    let file = write_config("[logging]\nlevel = \"loud\"\n");
    assert!(
        ConfigLoader::new()
            .with_config_path(file.path())
            .with_env_prefix("TETHER_LOADER_LEVEL")
            .load()
            .is_err()
    );
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tether.toml");
    let config = ConfigBuilder::new()
        .with_definition("greeter", "Greeter")
        .with_resolution(ResolutionConfig {
            detect_cycles: true,
            max_depth: 12,
            cache_resolvers: false,
        })
        .build();

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("TETHER_LOADER_SAVE");
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.container.definitions["greeter"], "Greeter");
    assert_eq!(loaded.container.resolution.max_depth, 12);
    assert!(!loaded.container.resolution.cache_resolvers);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}
