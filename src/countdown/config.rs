use crate::error::{CountdownError, Result};
use crate::model::{DEFAULT_COUNTDOWN_NAME, DEFAULT_LEAD_DAYS, MAX_LEAD_DAYS};
use crate::store::countdowns::DEFAULT_STORAGE_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "https://countdown.local/";

/// Keys accepted by [`AppConfig::get`] and [`AppConfig::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "base-url",
    "storage-limit",
    "storage-quota",
    "default-name",
    "default-lead-days",
];

/// App configuration, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Address share links are built on
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ceiling used for the usage percentage (advisory only)
    #[serde(default = "default_storage_limit")]
    pub storage_limit_bytes: usize,

    /// Hard cap on stored bytes; writes beyond it fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota_bytes: Option<usize>,

    #[serde(default = "default_name")]
    pub default_name: String,

    /// How far ahead of now a fresh countdown's target date is
    #[serde(default = "default_lead_days")]
    pub default_lead_days: i64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_storage_limit() -> usize {
    DEFAULT_STORAGE_LIMIT
}

fn default_name() -> String {
    DEFAULT_COUNTDOWN_NAME.to_string()
}

fn default_lead_days() -> i64 {
    DEFAULT_LEAD_DAYS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_limit_bytes: default_storage_limit(),
            storage_quota_bytes: None,
            default_name: default_name(),
            default_lead_days: default_lead_days(),
        }
    }
}

impl AppConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base-url" => Some(self.base_url.clone()),
            "storage-limit" => Some(self.storage_limit_bytes.to_string()),
            "storage-quota" => Some(
                self.storage_quota_bytes
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            "default-name" => Some(self.default_name.clone()),
            "default-lead-days" => Some(self.default_lead_days.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "base-url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(invalid(key, value));
                }
                let base = value.split('#').next().unwrap_or(value);
                self.base_url = base.to_string();
            }
            "storage-limit" => {
                self.storage_limit_bytes = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid(key, value))?;
            }
            "storage-quota" => {
                self.storage_quota_bytes = match value {
                    "none" | "" => None,
                    _ => Some(value.parse().map_err(|_| invalid(key, value))?),
                };
            }
            "default-name" => {
                if value.is_empty() {
                    return Err(invalid(key, value));
                }
                self.default_name = value.to_string();
            }
            "default-lead-days" => {
                self.default_lead_days = value
                    .parse::<i64>()
                    .ok()
                    .filter(|days| (0..=MAX_LEAD_DAYS).contains(days))
                    .ok_or_else(|| invalid(key, value))?;
            }
            _ => {
                return Err(CountdownError::Api(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> CountdownError {
    CountdownError::Api(format!("Invalid value for {}: \"{}\"", key, value))
}
