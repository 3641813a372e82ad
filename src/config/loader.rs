//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RegistryConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RegistryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RegistryConfig, ConfigError> {
    let config: RegistryConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:5000");
        assert_eq!(config.storage.database_path.to_str(), Some("infractions.db"));
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [server]
            bind_address = "0.0.0.0:8080"

            [storage]
            database_path = "/var/lib/registry/infractions.db"
            busy_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.storage.busy_timeout_ms, 250);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_are_reported_together() {
        let err = parse_config(
            r#"
            [server]
            bind_address = "nowhere"

            [observability]
            log_level = "chatty"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[observability]\nlog_level = \"warn\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.observability.log_level, "warn");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/registry.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
