use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyholderConfig {
    pub database: DatabaseSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl KeyholderConfig {
    pub fn new(database_path: &Path) -> Self {
        Self {
            database: DatabaseSection {
                path: database_path.to_string_lossy().to_string(),
            },
            logging: LoggingSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_database_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("keyholder.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<KeyholderConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &KeyholderConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keyholder"));
        }
    }
    Ok(home_dir()?.join(".config").join("keyholder"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keyholder"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("keyholder"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyholder").join("config.toml");
        let config = KeyholderConfig::new(Path::new("/tmp/keys.db"));

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.database.path, "/tmp/keys.db");
        assert_eq!(loaded.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_logging_section_is_optional() {
        let config: KeyholderConfig =
            toml::from_str("[database]\npath = \"/data/keys.db\"\n").unwrap();
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }
}
