//! Configuration for sleuthd.
//!
//! Loads settings from /etc/mailsleuth/config.toml, then the user config
//! directory, then defaults. The IntelBase API key can always be overridden
//! through the INTELBASE_API_KEY environment variable.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// System-wide config file path
pub const CONFIG_PATH: &str = "/etc/mailsleuth/config.toml";

/// Environment variable holding the IntelBase API key
pub const API_KEY_ENV: &str = "INTELBASE_API_KEY";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the daemon binds to. Localhost only by default.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7867".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// IntelBase upstream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelBaseConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key; usually left empty here and supplied via INTELBASE_API_KEY.
    #[serde(default)]
    pub api_key: String,

    /// Server-side lookup timeout applied when a request does not name one.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
}

fn default_api_url() -> String {
    "https://api.intelbase.is/lookup/email".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl Default for IntelBaseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub intelbase: IntelBaseConfig,
}

impl Config {
    /// Load config from the system path, then the user path, or fall back
    /// to defaults.
    pub fn load() -> Self {
        Self::load_from_path(&PathBuf::from(CONFIG_PATH))
            .or_else(|_| Self::load_from_path(&Self::user_config_path()))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailsleuth/config.toml")
    }

    /// Load config from specific path
    fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Effective IntelBase API key: the environment variable wins over the
    /// config file. May be empty; the lookup client reports that at call
    /// time.
    pub fn api_key(&self) -> String {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| self.intelbase.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7867");
        assert_eq!(config.intelbase.api_url, "https://api.intelbase.is/lookup/email");
        assert_eq!(config.intelbase.default_timeout_ms, 5_000);
        assert!(config.intelbase.api_key.is_empty());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
[intelbase]
api_key = "in_testkey"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.intelbase.api_key, "in_testkey");
        assert_eq!(config.intelbase.default_timeout_ms, 5_000);
        assert_eq!(config.server.bind_addr, "127.0.0.1:7867");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbind_addr = \"127.0.0.1:9000\"\n\n[intelbase]\ndefault_timeout_ms = 2000"
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.intelbase.default_timeout_ms, 2_000);
    }

    #[test]
    fn test_api_key_env_override() {
        let mut config = Config::default();
        config.intelbase.api_key = "from_file".to_string();

        std::env::remove_var(API_KEY_ENV);
        assert_eq!(config.api_key(), "from_file");

        std::env::set_var(API_KEY_ENV, "from_env");
        assert_eq!(config.api_key(), "from_env");
        std::env::remove_var(API_KEY_ENV);
    }
}
