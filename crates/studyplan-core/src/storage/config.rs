//! TOML-based planner configuration.
//!
//! Stores:
//! - Default table locations (calendar, discipline list, output)
//! - Planner tunables (attempt budget, UTC offset, storage mode, start offset)
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::discipline::StorageMode;
use crate::error::ConfigError;
use crate::scheduler::{SchedulerOptions, DEFAULT_MAX_ATTEMPTS};

/// Table locations used when the command line names none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_calendar")]
    pub calendar: PathBuf,
    #[serde(default = "default_disciplines")]
    pub disciplines: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Planner tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Offset calendar windows are interpreted in, `+HH:MM`, `-HH:MM` or `Z`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default)]
    pub storage: StorageMode,
    /// Days after today the plan starts when no date is given.
    #[serde(default = "default_start_offset_days")]
    pub start_offset_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_calendar() -> PathBuf {
    "hour_grade.csv".into()
}
fn default_disciplines() -> PathBuf {
    "disciplines.csv".into()
}
fn default_output() -> PathBuf {
    "planner.csv".into()
}
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_utc_offset() -> String {
    "+00:00".into()
}
fn default_start_offset_days() -> u32 {
    6
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            calendar: default_calendar(),
            disciplines: default_disciplines(),
            output: default_output(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            utc_offset: default_utc_offset(),
            storage: StorageMode::default(),
            start_offset_days: default_start_offset_days(),
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

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
        let cfg: Config = toml::from_str(&content).map_err(|e| failed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };

        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))
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

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Every leaf key with its current value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            flatten("", &json, &mut out);
        }
        out
    }

    /// Offset the calendar is read in.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_utc_offset(&self.planner.utc_offset)
    }

    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            max_attempts: self.planner.max_attempts,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.planner.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "planner.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        self.utc_offset().map(|_| ())
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

/// Parse `Z`, `+HH:MM` or `-HH:MM`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "planner.utc_offset".to_string(),
        message: format!("'{raw}' is not an offset like +02:00"),
    };

    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.planner.max_attempts, 7);
        assert_eq!(parsed.files.output, PathBuf::from("planner.csv"));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[planner]\nstorage = \"streaming\"\n").unwrap();
        assert_eq!(parsed.planner.storage, StorageMode::Streaming);
        assert_eq!(parsed.planner.start_offset_days, 6);
        assert_eq!(parsed.files.calendar, PathBuf::from("hour_grade.csv"));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("planner.max_attempts").as_deref(), Some("7"));
        assert_eq!(cfg.get("planner.storage").as_deref(), Some("materialized"));
        assert_eq!(cfg.get("files.disciplines").as_deref(), Some("disciplines.csv"));
        assert!(cfg.get("planner.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("planner.max_attempts", "3").unwrap();
        cfg.set("planner.storage", "streaming").unwrap();
        cfg.set("planner.utc_offset", "-03:00").unwrap();
        cfg.set("files.output", "out/plan.csv").unwrap();

        assert_eq!(cfg.planner.max_attempts, 3);
        assert_eq!(cfg.planner.storage, StorageMode::Streaming);
        assert_eq!(cfg.utc_offset().unwrap(), FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(cfg.files.output, PathBuf::from("out/plan.csv"));
    }

    #[test]
    fn set_rejects_unknown_keys() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("planner.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("planner", "1"), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn set_rejects_invalid_values_and_keeps_state() {
        let mut cfg = Config::default();
        assert!(cfg.set("planner.max_attempts", "many").is_err());
        assert!(cfg.set("planner.max_attempts", "0").is_err());
        assert!(cfg.set("planner.storage", "cloud").is_err());
        assert!(cfg.set("planner.utc_offset", "UTC+3").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn entries_list_every_leaf() {
        let keys: Vec<String> = Config::default().entries().into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"files.calendar".to_string()));
        assert!(keys.contains(&"planner.start_offset_days".to_string()));
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("planner.max_attempts", "2").unwrap();
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner\nmax_attempts = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn utc_offsets() {
        assert_eq!(parse_utc_offset("Z").unwrap(), Utc.fix());
        assert_eq!(
            parse_utc_offset("+05:30").unwrap(),
            FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
        );
        assert!(parse_utc_offset("05:30").is_err());
        assert!(parse_utc_offset("+5:30").is_err());
        assert!(parse_utc_offset("+24:00").is_err());
        assert!(parse_utc_offset("+01:60").is_err());
    }
}
