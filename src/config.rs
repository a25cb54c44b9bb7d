//! Planner configuration.
//!
//! Loaded from `~/.writgo/config.toml`. Defaults apply when the file is missing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::planner::PlanRules;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Weekday articles when `plan generate` is run without `--articles-per-day`.
    pub articles_per_day: usize,

    /// Caps and thresholds for generation and validation.
    pub rules: PlanRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            articles_per_day: 2,
            rules: PlanRules::default(),
        }
    }
}

impl Config {
    /// Load config from `~/.writgo/config.toml`.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.rules.max_per_day == 0 || config.rules.max_per_topic_per_day == 0 {
            return Err(format!(
                "daily caps must be at least 1 in {}",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.writgo/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".writgo").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "articles-per-day = 3\n\n[rules]\nmax-per-topic-per-day = 1\ncluster-quota = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.articles_per_day, 3);
        assert_eq!(config.rules.max_per_day, 3);
        assert_eq!(config.rules.max_per_topic_per_day, 1);
        assert_eq!(config.rules.cluster_quota, 5);
    }

    #[test]
    fn rejects_zero_caps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[rules]\nmax-per-day = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.contains("daily caps"), "{err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "articles-per-day = \"lots\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config at"), "{err}");
    }
}
