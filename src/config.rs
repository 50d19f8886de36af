// src/config.rs
//! Process configuration - built once at startup and handed to each stage

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_LINKEDIN_API_URL: &str = "https://api.linkedin.com/v2";
pub const DEFAULT_LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub linkedin: LinkedinSettings,
    pub openai: OpenAiSettings,
    pub rules_path: Option<PathBuf>,
    pub timeout_seconds: u64,
    /// API server port
    pub port: u16,
}

#[derive(Clone)]
pub struct LinkedinSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_base_url: String,
    pub token_url: String,
}

#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

/// Non-secret settings that may live in a YAML file
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub linkedin_api_url: Option<String>,
    pub linkedin_token_url: Option<String>,
    pub openai_api_url: Option<String>,
    pub openai_model: Option<String>,
    pub rules_path: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub port: Option<u16>,
}

impl AppConfig {
    /// Load `.env`, then the optional YAML file, then the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let file = match config_path {
            Some(path) => Self::read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let config = Self::from_sources(file, |key| std::env::var(key).ok())?;
        info!(
            "Configuration loaded (model: {}, timeout: {}s, rules: {})",
            config.openai.model,
            config.timeout_seconds,
            config
                .rules_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        Ok(config)
    }

    fn read_config_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Merge a config file with an environment lookup; the environment wins
    pub fn from_sources<F>(file: ConfigFile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_seconds = match var("ANALYZER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("ANALYZER_TIMEOUT_SECS must be a number of seconds"))?,
            None => file.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be at least 1 second");
        }

        let port = match var("ROCKET_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            linkedin: LinkedinSettings {
                client_id: var("LINKEDIN_CLIENT_ID"),
                client_secret: var("LINKEDIN_CLIENT_SECRET"),
                api_base_url: var("LINKEDIN_API_URL")
                    .or(file.linkedin_api_url)
                    .unwrap_or_else(|| DEFAULT_LINKEDIN_API_URL.to_string()),
                token_url: var("LINKEDIN_TOKEN_URL")
                    .or(file.linkedin_token_url)
                    .unwrap_or_else(|| DEFAULT_LINKEDIN_TOKEN_URL.to_string()),
            },
            openai: OpenAiSettings {
                api_key: var("OPENAI_API_KEY"),
                base_url: var("OPENAI_API_URL")
                    .or(file.openai_api_url)
                    .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
                model: var("OPENAI_MODEL")
                    .or(file.openai_model)
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            rules_path: var("ANALYZER_RULES_PATH")
                .map(PathBuf::from)
                .or(file.rules_path),
            timeout_seconds,
            port,
        })
    }
}

// Secrets stay out of Debug output
impl std::fmt::Debug for LinkedinSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedinSettings")
            .field("client_id", &self.client_id.as_ref().map(|_| "***"))
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_sources(ConfigFile::default(), lookup(&[])).unwrap();
        assert!(config.linkedin.client_id.is_none());
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.linkedin.api_base_url, DEFAULT_LINKEDIN_API_URL);
        assert_eq!(config.openai.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(config.rules_path.is_none());
    }

    #[test]
    fn test_blank_secrets_count_as_missing() {
        let config = AppConfig::from_sources(
            ConfigFile::default(),
            lookup(&[("LINKEDIN_CLIENT_ID", "  "), ("LINKEDIN_CLIENT_SECRET", "s3cret")]),
        )
        .unwrap();
        assert!(config.linkedin.client_id.is_none());
        assert_eq!(config.linkedin.client_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file: ConfigFile = serde_yaml::from_str(
            "openai_model: gpt-4o-mini\ntimeout_seconds: 15\nrules_path: rules.toml\n",
        )
        .unwrap();
        let config =
            AppConfig::from_sources(file, lookup(&[("OPENAI_MODEL", "gpt-4o")])).unwrap();
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.timeout_seconds, 15);
        assert_eq!(config.rules_path, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = AppConfig::from_sources(
            ConfigFile::default(),
            lookup(&[("ANALYZER_TIMEOUT_SECS", "soon")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let from_env = AppConfig::from_sources(
            ConfigFile::default(),
            lookup(&[("ANALYZER_TIMEOUT_SECS", "0")]),
        );
        assert!(from_env.is_err());

        let file: ConfigFile = serde_yaml::from_str("timeout_seconds: 0\n").unwrap();
        assert!(AppConfig::from_sources(file, lookup(&[])).is_err());
    }

    #[test]
    fn test_port_layers() {
        let config = AppConfig::from_sources(ConfigFile::default(), lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);

        let blank = AppConfig::from_sources(ConfigFile::default(), lookup(&[("ROCKET_PORT", "")]))
            .unwrap();
        assert_eq!(blank.port, DEFAULT_PORT);

        let file: ConfigFile = serde_yaml::from_str("port: 9100\n").unwrap();
        let config = AppConfig::from_sources(file, lookup(&[("ROCKET_PORT", "9200")])).unwrap();
        assert_eq!(config.port, 9200);

        let bad = AppConfig::from_sources(ConfigFile::default(), lookup(&[("ROCKET_PORT", "http")]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AppConfig::from_sources(
            ConfigFile::default(),
            lookup(&[("OPENAI_API_KEY", "sk-very-secret")]),
        )
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-very-secret"));
    }
}
