use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{CurrencyCode, LocaleConfig},
    errors::{StoreError, StoreResult},
    utils::{app_data_dir, write_atomic},
};

const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_ENTITY_COLOR: &str = "#3B82F6";

/// Swatches offered when creating or editing an entity.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#F97316", "#06B6D4", "#84CC16",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "default_entity_color")]
    pub default_entity_color: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_entity_color() -> String {
    DEFAULT_ENTITY_COLOR.into()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_entity_color: default_entity_color(),
            palette: default_palette(),
        }
    }
}

impl Config {
    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.currency.trim().is_empty() {
            return Err(StoreError::Config("currency must not be empty".into()));
        }
        if self.default_entity_color.trim().is_empty() {
            return Err(StoreError::Config(
                "default entity color must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and saves the JSON configuration file under the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config, falling back to defaults when no file exists yet.
    pub fn load(&self) -> StoreResult<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> StoreResult<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.currency_code().symbol(), "$");
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("nested"));
        let config = Config {
            currency: "MYR".into(),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap().currency, "MYR");
    }

    #[test]
    fn partial_files_fill_in_palette() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        fs::write(manager.path(), r#"{"locale":"de-DE","currency":"EUR"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_entity_color, DEFAULT_ENTITY_COLOR);
        assert_eq!(config.locale_config().decimal_separator, ',');
    }

    #[test]
    fn blank_currency_is_rejected() {
        let config = Config {
            currency: " ".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }
}
