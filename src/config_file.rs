//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use subvtt_lib::SubtitleFormat;

use crate::config::{ConversionConfig, ServerConfig};
use crate::error::{Result, ServerError};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Conversion settings
    pub conversion: Option<ConversionSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Reject documents that yield no cues
    pub reject_empty: Option<bool>,
    /// Format assumed without a request hint (srt, ass, unknown)
    pub default_format: Option<SubtitleFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum request body size in MB
    pub max_request_size_mb: Option<usize>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: Some(true),
            },
            conversion: Some(ConversionSettings {
                reject_empty: Some(false),
                default_format: Some(SubtitleFormat::Unknown),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
            limits: Some(LimitsSettings {
                max_request_size_mb: Some(10),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let conversion = self.conversion.unwrap_or(ConversionSettings {
            reject_empty: None,
            default_format: None,
        });

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            conversion: ConversionConfig {
                reject_empty: conversion.reject_empty.unwrap_or(false),
                default_format: conversion.default_format.unwrap_or_default(),
            },
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or(defaults.log_level),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
            max_request_size_mb: self
                .limits
                .and_then(|l| l.max_request_size_mb)
                .unwrap_or(defaults.max_request_size_mb),
        }
    }
}

/// Load the server configuration, falling back to defaults when the file is
/// missing or unreadable
pub fn load_or_default<P: AsRef<Path>>(path: P) -> ServerConfig {
    let path = path.as_ref();
    if !path.exists() {
        return ServerConfig::default();
    }
    match ConfigFile::from_file(path) {
        Ok(cf) => cf.into_server_config(),
        Err(e) => {
            tracing::warn!(
                "Failed to load config file {}: {}. Using defaults.",
                path.display(),
                e
            );
            ServerConfig::default()
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default_config();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.conversion.unwrap().default_format,
            Some(SubtitleFormat::Unknown)
        );
    }

    #[test]
    fn test_config_file_roundtrip() {
        let config = ConfigFile::default_config();

        let mut temp_file = NamedTempFile::new().unwrap();
        let content = toml::to_string_pretty(&config).unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let loaded = ConfigFile::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.server.port, config.server.port);
        assert_eq!(
            loaded.limits.unwrap().max_request_size_mb,
            config.limits.unwrap().max_request_size_mb
        );
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[server]\nhost = \"127.0.0.1\"\nport = 8088\n").unwrap();

        let config = ConfigFile::from_file(temp_file.path())
            .unwrap()
            .into_server_config();
        assert_eq!(config.socket_addr(), "127.0.0.1:8088");
        assert!(config.cors_enabled);
        assert!(!config.conversion.reject_empty);
        assert_eq!(config.max_request_size_mb, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_conversion_section() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "[server]\nhost = \"0.0.0.0\"\nport = 3000\n\n[conversion]\nreject_empty = true\ndefault_format = \"ass\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n"
        )
        .unwrap();

        let config = ConfigFile::from_file(temp_file.path())
            .unwrap()
            .into_server_config();
        assert!(config.conversion.reject_empty);
        assert_eq!(config.conversion.default_format, SubtitleFormat::Ass);
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[server]\nport = \"not a number\"\n").unwrap();

        let err = ConfigFile::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        assert_eq!(load_or_default(temp_file.path()).port, 3000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_or_default("/nonexistent/subvtt/config.toml");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_generate_default_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        generate_default_config(&path).unwrap();

        assert!(path.exists());
        let loaded = ConfigFile::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 3000);
    }
}
