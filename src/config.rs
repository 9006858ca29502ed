use crate::engine::EngineOptions;
use crate::notifications::DEFAULT_NOTIFICATION_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_notification_ms() -> u64 {
    DEFAULT_NOTIFICATION_MS
}

fn default_gate() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How long a notification banner stays up
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    /// Wait for a command's notification to clear before running the next one
    #[serde(default = "default_gate")]
    pub gate_queue_on_notification: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notification_ms: default_notification_ms(),
            gate_queue_on_notification: default_gate(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            notification_duration: self.notification_duration(),
            gate_on_notification: self.gate_queue_on_notification,
        }
    }
}

/// Load config.json; a missing file gives the defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
