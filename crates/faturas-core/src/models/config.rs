//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for faturas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaturasConfig {
    /// Record store configuration.
    pub storage: StorageConfig,

    /// Report rendering configuration.
    pub report: ReportConfig,
}

/// Record store selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend holds the records.
    pub backend: StorageBackend,
}

/// Storage backend, chosen explicitly in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite database file with a `receipts` table.
    Sqlite { path: PathBuf },

    /// CSV sheet with one row per receipt.
    Spreadsheet { path: PathBuf },
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("faturas_continente.db"),
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Symbol appended to amounts in text output.
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
        }
    }
}

impl FaturasConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaturasConfig::default();
        assert_eq!(
            config.storage.backend,
            StorageBackend::Sqlite {
                path: PathBuf::from("faturas_continente.db")
            }
        );
        assert_eq!(config.report.currency_symbol, "€");
    }

    #[test]
    fn test_spreadsheet_backend_from_json() {
        let json = r#"{"storage": {"backend": {"kind": "spreadsheet", "path": "sheet.csv"}}}"#;
        let config: FaturasConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.storage.backend,
            StorageBackend::Spreadsheet {
                path: PathBuf::from("sheet.csv")
            }
        );
        assert_eq!(config.report.currency_symbol, "€");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FaturasConfig::default();
        config.report.currency_symbol = "EUR".to_string();
        config.save(&path).unwrap();

        let loaded = FaturasConfig::from_file(&path).unwrap();
        assert_eq!(loaded.report.currency_symbol, "EUR");
    }

    #[test]
    fn test_unknown_backend_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"storage": {"backend": {"kind": "gsheets"}}}"#).unwrap();

        let err = FaturasConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
