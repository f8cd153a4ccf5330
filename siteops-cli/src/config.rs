use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the site backend, e.g. "http://localhost:5000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl SiteConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("siteops")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Effective API base URL: command-line flag wins, then the
    /// `SITEOPS_API_URL` environment variable, then the config file.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| std::env::var("SITEOPS_API_URL").ok())
            .unwrap_or_else(|| self.api_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = SiteConfig {
            api_url: "http://example.com:8080".to_string(),
        };
        config.save_to(&path).unwrap();

        let loaded = SiteConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, config.api_url);
    }

    #[test]
    fn flag_wins_over_config_file() {
        let config = SiteConfig::default();
        assert_eq!(
            config.resolve_api_url(Some("http://flag:1")),
            "http://flag:1"
        );
    }
}
