//! TOML-based application configuration.
//!
//! Stores the planner's ambient settings:
//! - the base quota tables per day type,
//! - the holiday calendar zone and local closure days,
//! - the year window consistency checks scan.
//!
//! Configuration is stored at `~/.config/gardeplan/config.toml`.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::{FrenchHolidays, HolidayCalendar, HolidayOracle};
use crate::error::{ConfigError, Result};
use crate::roster::BaseQuotaTable;

/// Holiday calendar selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarZone {
    /// French national holidays, plus `extra_holidays`.
    #[default]
    France,
    /// Exactly the dates listed in `extra_holidays`.
    Custom,
}

/// Calendar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub zone: CalendarZone,
    /// Local closure days layered over (or, for `custom`, forming) the
    /// holiday calendar.
    #[serde(default)]
    pub extra_holidays: Vec<NaiveDate>,
    /// First year scanned by consistency checks.
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last year scanned by consistency checks (inclusive).
    #[serde(default = "default_end_year")]
    pub end_year: i32,
}

fn current_year() -> i32 {
    chrono::Local::now().date_naive().year()
}

fn default_start_year() -> i32 {
    current_year()
}

fn default_end_year() -> i32 {
    current_year() + 1
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            zone: CalendarZone::default(),
            extra_holidays: Vec::new(),
            start_year: default_start_year(),
            end_year: default_end_year(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/gardeplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub quotas: BaseQuotaTable,
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the stored configuration, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load a configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let text =
            toml::to_string_pretty(self).map_err(|e| ConfigError::EncodeFailed(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Inclusive year window for consistency checks.
    pub fn years(&self) -> RangeInclusive<i32> {
        let start = self.calendar.start_year;
        start..=self.calendar.end_year.max(start)
    }

    /// The holiday oracle this configuration describes.
    pub fn oracle(&self) -> Box<dyn HolidayOracle> {
        let extra = self.calendar.extra_holidays.iter().copied();
        match self.calendar.zone {
            CalendarZone::France => Box::new(FrenchHolidays::with_extra_days(extra)),
            CalendarZone::Custom => Box::new(extra.collect::<HolidayCalendar>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.calendar.zone = CalendarZone::Custom;
        config.calendar.extra_holidays = vec![date(2024, 12, 24)];
        config.calendar.start_year = 2024;
        config.calendar.end_year = 2025;
        config.quotas.weekday.insert("maternite".into(), 1);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\nstart_year = 2024\nend_year = 2024\n").unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.calendar.zone, CalendarZone::France);
        assert_eq!(loaded.years(), 2024..=2024);
        assert_eq!(loaded.quotas, BaseQuotaTable::default());
    }

    #[test]
    fn inverted_year_window_is_clamped() {
        let mut config = Config::default();
        config.calendar.start_year = 2025;
        config.calendar.end_year = 2024;
        assert_eq!(config.years(), 2025..=2025);
    }

    #[test]
    fn french_zone_oracle_includes_extra_days() {
        let mut config = Config::default();
        config.calendar.extra_holidays = vec![date(2024, 12, 26)];
        let oracle = config.oracle();
        assert!(oracle.is_holiday(date(2024, 7, 14)));
        assert!(oracle.is_holiday(date(2024, 12, 26)));
    }

    #[test]
    fn custom_zone_oracle_is_exactly_the_listed_days() {
        let mut config = Config::default();
        config.calendar.zone = CalendarZone::Custom;
        config.calendar.extra_holidays = vec![date(2024, 12, 24)];
        let oracle = config.oracle();
        assert!(oracle.is_holiday(date(2024, 12, 24)));
        assert!(!oracle.is_holiday(date(2024, 7, 14)));
    }
}
