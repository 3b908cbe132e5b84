use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub interval_secs: Option<u32>,
    pub highlight_count: Option<u32>,
    pub preroll_secs: Option<u32>,
    pub trim_minutes: Option<u32>,
    pub chatlog_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.config/vodx/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("vodx")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
interval_secs = 30
highlight_count = 5
preroll_secs = 20
trim_minutes = 15
chatlog_dir = "logs/chat"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.interval_secs, Some(30));
        assert_eq!(config.highlight_count, Some(5));
        assert_eq!(config.preroll_secs, Some(20));
        assert_eq!(config.trim_minutes, Some(15));
        assert_eq!(config.chatlog_dir, Some(PathBuf::from("logs/chat")));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.interval_secs.is_none());
        assert!(config.chatlog_dir.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"highlight_count = 3"#).unwrap();
        assert_eq!(config.highlight_count, Some(3));
        assert!(config.preroll_secs.is_none());
    }
}
