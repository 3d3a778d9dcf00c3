//! `dsegeo` settings.
//!
//! Read from `<config dir>/dsegeo/config.toml`, e.g.:
//! ```toml
//! format = "json"
//! byte_order = "big"
//! color = false
//! ```
//! Every key is optional. A missing file means defaults.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wkb::ByteOrder;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Text form used when printing a decoded geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Wkt,
    Json,
}

/// Byte order used when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrderSetting {
    #[default]
    Native,
    Big,
    Little,
}

impl ByteOrderSetting {
    pub fn resolve(self) -> ByteOrder {
        match self {
            ByteOrderSetting::Native => ByteOrder::native(),
            ByteOrderSetting::Big => ByteOrder::BigEndian,
            ByteOrderSetting::Little => ByteOrder::LittleEndian,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    pub byte_order: ByteOrderSetting,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Wkt,
            byte_order: ByteOrderSetting::Native,
            color: true,
        }
    }
}

impl Config {
    /// `<config dir>/dsegeo/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dsegeo").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A file that does not exist yields defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("format = \"json\"\nbyte_order = \"big\"\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.byte_order, ByteOrderSetting::Big);
        assert!(config.color);
    }

    #[test]
    fn test_parse_rejects_bad_value() {
        assert!(Config::parse("byte_order = \"middle\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("dsegeo-no-such-dir").join("config.toml");
        assert_eq!(Config::from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("dsegeo-config-{}.toml", std::process::id()));
        std::fs::write(&path, "color = false\n").unwrap();
        let config = Config::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.color);
        assert_eq!(config.format, OutputFormat::Wkt);
    }

    #[test]
    fn test_resolve_byte_order() {
        assert_eq!(ByteOrderSetting::Big.resolve(), ByteOrder::BigEndian);
        assert_eq!(ByteOrderSetting::Little.resolve(), ByteOrder::LittleEndian);
        assert_eq!(ByteOrderSetting::Native.resolve(), ByteOrder::native());
    }
}
