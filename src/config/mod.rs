//! Configuration management for the module guide

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::guide::{BACK_TO_TOP_THRESHOLD, STORAGE_KEY};
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Animation speed multiplier (1.0 = normal, 0.0 = instant)
    #[serde(default = "default_animation_speed")]
    pub animation_speed: f32,

    /// Show the back-to-top control
    #[serde(default = "default_back_to_top")]
    pub back_to_top: bool,

    /// Rows scrolled before the back-to-top control appears
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: usize,

    /// Key the completion set is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Guide opened when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_path: Option<PathBuf>,
}

fn default_animation_speed() -> f32 {
    1.0
}

fn default_back_to_top() -> bool {
    true
}

fn default_back_to_top_threshold() -> usize {
    BACK_TO_TOP_THRESHOLD
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            animation_speed: default_animation_speed(),
            back_to_top: default_back_to_top(),
            back_to_top_threshold: default_back_to_top_threshold(),
            storage_key: default_storage_key(),
            guide_path: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "module-guide")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "module-guide")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the path of the key/value store holding completion state
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    /// Get the path of the TUI log file
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("guide.log"))
    }

    /// Get the active theme: the custom one, else the named built-in
    pub fn active_theme(&self) -> Theme {
        if let Some(theme) = &self.custom_theme {
            return theme.clone();
        }
        Theme::named(&self.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Tokyo Night", self.theme);
            Theme::tokyo_night()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_tokyo_night_theme() {
        let config = Config::default();
        assert_eq!(config.theme, "Tokyo Night");
    }

    #[test]
    fn default_config_uses_standard_storage_key() {
        let config = Config::default();
        assert_eq!(config.storage_key, "completedModules");
        assert_eq!(config.back_to_top_threshold, 300);
        assert!(config.back_to_top);
    }

    #[test]
    fn active_theme_resolves_by_name() {
        let mut config = Config { theme: "Tokyo Night Storm".to_string(), ..Config::default() };
        assert_eq!(config.active_theme().name, "Tokyo Night Storm");

        config.theme = "No Such Theme".to_string();
        assert_eq!(config.active_theme().name, "Tokyo Night");

        config.custom_theme = Some(Theme { name: "Mine".to_string(), ..Theme::default() });
        assert_eq!(config.active_theme().name, "Mine");
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Tokyo Night"));
        assert!(!json.contains("guide_path"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let json = r#"{"theme":"Custom","animation_speed":0.5}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, "Custom");
        assert_eq!(config.animation_speed, 0.5);
        assert_eq!(config.storage_key, "completedModules");
        assert!(config.guide_path.is_none());
    }

    #[test]
    fn load_from_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, "Tokyo Night");

        let mut changed = config.clone();
        changed.back_to_top_threshold = 12;
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().back_to_top_threshold, 12);
    }
}
