use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Category opened on start. Empty means the catalog's first category.
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_slides_enabled")]
    pub slides_enabled: bool,
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
    #[serde(default = "default_show_difficulty")]
    pub show_difficulty: bool,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_category() -> String {
    String::new()
}
fn default_slides_enabled() -> bool {
    true
}
fn default_catalog_dir() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drillbook")
        .join("catalog")
        .to_string_lossy()
        .to_string()
}
fn default_show_difficulty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_category: default_category(),
            slides_enabled: default_slides_enabled(),
            catalog_dir: default_catalog_dir(),
            show_difficulty: default_show_difficulty(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drillbook")
            .join("config.toml")
    }

    pub fn catalog_dir(&self) -> PathBuf {
        expand_home(&self.catalog_dir)
    }

    /// Reset `default_category` when it no longer names a catalog category,
    /// e.g. after a user catalog file was removed.
    pub fn normalize_category(&mut self, catalog: &impl Catalog) {
        if !self.default_category.is_empty() && !catalog.contains_category(&self.default_category)
        {
            self.default_category = default_category();
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert!(config.slides_enabled);
        assert!(config.show_difficulty);
        assert!(config.default_category.is_empty());
        assert!(config.catalog_dir.contains("catalog"));
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "catppuccin-mocha"
slides_enabled = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert!(!config.slides_enabled);
        assert!(config.show_difficulty);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.default_category = "recursion".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.default_category, "recursion");
        assert_eq!(deserialized.catalog_dir, config.catalog_dir);
    }

    #[test]
    fn test_normalize_category_unknown_resets() {
        let catalog = StaticCatalog::from_lists([("loops", vec![])]);
        let mut config = Config::default();
        config.default_category = "graphs".to_string();
        config.normalize_category(&catalog);
        assert!(config.default_category.is_empty());

        config.default_category = "loops".to_string();
        config.normalize_category(&catalog);
        assert_eq!(config.default_category, "loops");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/catalog"), PathBuf::from("/tmp/catalog"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/drills"), home.join("drills"));
        }
    }
}
