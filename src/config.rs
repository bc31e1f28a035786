// File: ./src/config.rs
// Handles configuration loading, environment overrides, and defaults.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional TOML file read before environment overrides are applied.
pub const ENV_CONFIG_PATH: &str = "CHOREBRIDGE_CONFIG";
pub const ENV_LOG_LEVEL: &str = "CHOREBRIDGE_LOG";

pub const ENV_SKYLIGHT_TOKEN: &str = "SKYLIGHT_TOKEN";
pub const ENV_FRAME_ID: &str = "FRAME_ID";
pub const ENV_HF_TOKEN: &str = "HF_TOKEN";
pub const ENV_BASE_URL: &str = "SKYLIGHT_BASE_URL";
pub const ENV_LLM_URL: &str = "HF_API_URL";
pub const ENV_PORT: &str = "PORT";

fn default_base_url() -> String {
    "https://app.ourskylight.com".to_string()
}
fn default_user_agent() -> String {
    "SkylightMobile/1.95.2 (ios 26.2)".to_string()
}

fn default_llm_url() -> String {
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.3".to_string()
}
fn default_llm_max_new_tokens() -> u32 {
    100
}
fn default_llm_temperature() -> f32 {
    0.1
}
fn default_llm_timeout_secs() -> u64 {
    30
}

fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub skylight_token: String,
    #[serde(default)]
    pub frame_id: String,
    #[serde(default)]
    pub hf_token: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Applies to the chores read/write calls. `None` leaves them unbounded.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_llm_url")]
    pub llm_url: String,
    #[serde(default = "default_llm_max_new_tokens")]
    pub llm_max_new_tokens: u32,
    #[serde(default = "default_llm_temperature")]
    pub llm_temperature: f32,
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skylight_token: String::new(),
            frame_id: String::new(),
            hf_token: String::new(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            llm_url: default_llm_url(),
            llm_max_new_tokens: default_llm_max_new_tokens(),
            llm_temperature: default_llm_temperature(),
            llm_timeout_secs: default_llm_timeout_secs(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(s: &str) -> &'static str {
            if s.is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("Config")
            .field("skylight_token", &redact(&self.skylight_token))
            .field("frame_id", &self.frame_id)
            .field("hf_token", &redact(&self.hf_token))
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("llm_url", &self.llm_url)
            .field("llm_max_new_tokens", &self.llm_max_new_tokens)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load the process-wide configuration: optional TOML file named by
    /// `CHOREBRIDGE_CONFIG`, then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::load_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file with contextualized errors.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SKYLIGHT_TOKEN) {
            self.skylight_token = v;
        }
        if let Some(v) = get(ENV_FRAME_ID) {
            self.frame_id = v;
        }
        if let Some(v) = get(ENV_HF_TOKEN) {
            self.hf_token = v;
        }
        if let Some(v) = get(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = get(ENV_LLM_URL) {
            self.llm_url = v;
        }
        if let Some(v) = get(ENV_PORT) {
            self.port = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", ENV_PORT, v))?;
        }
        if let Some(v) = get(ENV_LOG_LEVEL) {
            self.log_level = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.skylight_token.trim().is_empty() {
            anyhow::bail!("{} is not set", ENV_SKYLIGHT_TOKEN);
        }
        if self.frame_id.trim().is_empty() {
            anyhow::bail!("{} is not set", ENV_FRAME_ID);
        }
        Ok(())
    }

    /// Without a model token every completion request ends in "no match".
    pub fn has_llm_token(&self) -> bool {
        !self.hf_token.trim().is_empty()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://app.ourskylight.com");
        assert_eq!(config.llm_max_new_tokens, 100);
        assert_eq!(config.llm_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides_and_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config
            .apply_overrides(lookup_from(&[
                (ENV_SKYLIGHT_TOKEN, "Bearer abc"),
                (ENV_FRAME_ID, "4242"),
                (ENV_PORT, "9090"),
                (ENV_HF_TOKEN, ""),
            ]))
            .unwrap();

        assert_eq!(config.skylight_token, "Bearer abc");
        assert_eq!(config.frame_id, "4242");
        assert_eq!(config.port, 9090);
        assert!(!config.has_llm_token());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_frame_is_named() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[(ENV_SKYLIGHT_TOKEN, "t")]))
            .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(ENV_FRAME_ID));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let mut config = Config::default();
        let res = config.apply_overrides(lookup_from(&[(ENV_PORT, "eighty")]));
        assert!(res.is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            skylight_token = "tok"
            frame_id = "1"
            llm_temperature = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.llm_temperature, 0.3);
        assert_eq!(config.user_agent, "SkylightMobile/1.95.2 (ios 26.2)");
        assert_eq!(config.llm_max_new_tokens, 100);
    }

    #[test]
    fn test_debug_hides_tokens() {
        let mut config = Config::default();
        config.skylight_token = "secret-token".to_string();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_api_root_trims_slash() {
        let mut config = Config::default();
        config.base_url = "http://127.0.0.1:1234/".to_string();
        assert_eq!(config.api_root(), "http://127.0.0.1:1234");
    }
}
