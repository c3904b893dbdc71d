//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Countdown default target
//! - Vibration cues
//! - Generative-AI endpoint and sampling settings
//! - Quiz timing
//! - Report period
//!
//! Configuration is stored at `~/.config/studyroom/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::ai::GeminiOptions;
use crate::error::ConfigError;
use crate::quiz::QuizConfig;
use crate::report::ReportPeriod;

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_countdown_minutes")]
    pub countdown_minutes: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub vibration: bool,
}

/// Generative-AI configuration. The API key is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Time-attack quiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(default = "default_quiz_total_secs")]
    pub total_secs: u64,
    #[serde(default = "default_quiz_ready_secs")]
    pub ready_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub default_period: ReportPeriod,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyroom/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub quiz: QuizSettings,
    #[serde(default)]
    pub report: ReportConfig,
}

// Default functions
fn default_countdown_minutes() -> u32 {
    25
}
fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    crate::ai::client::DEFAULT_BASE_URL.into()
}
fn default_model() -> String {
    crate::ai::client::DEFAULT_MODEL.into()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_top_p() -> f64 {
    0.8
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_quiz_total_secs() -> u64 {
    180
}
fn default_quiz_ready_secs() -> u64 {
    3
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            countdown_minutes: default_countdown_minutes(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { vibration: true }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_secs: default_quiz_total_secs(),
            ready_secs: default_quiz_ready_secs(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. The result must still
    /// deserialize, so `report.default_period = year` is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;
        *self = updated;
        Ok(())
    }

    /// Dotted keys of every leaf value, sorted within each section.
    pub fn keys(&self) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let path = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&path, v, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    fn validate(&self) -> Result<(), String> {
        if self.timer.countdown_minutes == 0 {
            return Err("countdown must be at least one minute".into());
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err("temperature must be within 0.0..=2.0".into());
        }
        if !(0.0..=1.0).contains(&self.ai.top_p) {
            return Err("top_p must be within 0.0..=1.0".into());
        }
        if self.quiz.total_secs == 0 {
            return Err("quiz needs a positive time limit".into());
        }
        Ok(())
    }

    pub fn gemini_options(&self) -> GeminiOptions {
        GeminiOptions {
            base_url: self.ai.base_url.clone(),
            model: self.ai.model.clone(),
            temperature: self.ai.temperature,
            top_p: self.ai.top_p,
            timeout_secs: self.ai.timeout_secs,
        }
    }

    pub fn quiz_config(&self) -> QuizConfig {
        QuizConfig {
            total_secs: self.quiz.total_secs,
            ready_secs: self.quiz.ready_secs,
        }
    }

    pub fn countdown_target_secs(&self) -> u64 {
        u64::from(self.timer.countdown_minutes) * 60
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.countdown_minutes, 25);
        assert_eq!(parsed.ai.model, cfg.ai.model);
        assert_eq!(parsed.report.default_period, ReportPeriod::Week);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[ai]\nmodel = \"gemini-flash\"\n").unwrap();
        assert_eq!(parsed.ai.model, "gemini-flash");
        assert_eq!(parsed.ai.top_p, 0.8);
        assert_eq!(parsed.quiz.total_secs, 180);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.vibration").as_deref(), Some("true"));
        assert_eq!(cfg.get("timer.countdown_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("report.default_period").as_deref(), Some("week"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("timer.countdown_minutes", "50").unwrap();
        cfg.set("ai.temperature", "0.5").unwrap();
        cfg.set("notifications.vibration", "false").unwrap();
        cfg.set("report.default_period", "month").unwrap();
        assert_eq!(cfg.countdown_target_secs(), 3000);
        assert_eq!(cfg.gemini_options().temperature, 0.5);
        assert!(!cfg.notifications.vibration);
        assert_eq!(cfg.report.default_period, ReportPeriod::Month);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("timer", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_values_without_mutating() {
        let mut cfg = Config::default();
        for (key, value) in [
            ("notifications.vibration", "sometimes"),
            ("timer.countdown_minutes", "soon"),
            ("timer.countdown_minutes", "0"),
            ("ai.top_p", "1.5"),
            ("report.default_period", "year"),
        ] {
            assert!(
                matches!(cfg.set(key, value), Err(ConfigError::InvalidValue { .. })),
                "{key}={value} accepted"
            );
        }
        assert_eq!(cfg.timer.countdown_minutes, 25);
        assert_eq!(cfg.report.default_period, ReportPeriod::Week);
    }

    #[test]
    fn keys_lists_every_leaf() {
        let keys = Config::default().keys();
        assert!(keys.contains(&"ai.base_url".to_string()));
        assert!(keys.contains(&"quiz.ready_secs".to_string()));
        assert!(!keys.contains(&"ai".to_string()));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.quiz.ready_secs, 3);
        assert!(path.exists());

        let mut cfg = cfg;
        cfg.set("quiz.ready_secs", "5").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().quiz.ready_secs, 5);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
