// src/config.rs
//
// Planner configuration.
//
// Everything has a usable default. Environment overrides:
// - MEDIAPLANNER_DB_PATH: database file
// - MEDIAPLANNER_LOCALE: display locale, e.g. "de_DE" or "en-GB"
// - MEDIAPLANNER_UTC_OFFSET_MINUTES: display offset, e.g. "120" or "-300"

use chrono::{Duration, FixedOffset};
use std::path::PathBuf;

use crate::domain::reminder::invariants::DUPLICATE_TOLERANCE_MS;
use crate::domain::{DisplayLocale, TimestampFormatter};
use crate::error::{AppError, AppResult};

pub const DB_PATH_ENV: &str = "MEDIAPLANNER_DB_PATH";
pub const LOCALE_ENV: &str = "MEDIAPLANNER_LOCALE";
pub const UTC_OFFSET_ENV: &str = "MEDIAPLANNER_UTC_OFFSET_MINUTES";

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// SQLite file holding the planner entries
    pub database_path: PathBuf,

    pub pool_max_size: u32,

    pub duplicate_tolerance_ms: i64,

    pub display_locale: DisplayLocale,

    /// Offset used for display and calendar-day queries
    pub utc_offset_minutes: i32,
}

impl PlannerConfig {
    /// Defaults, with the database path taken from the environment or the
    /// platform data directory, and locale / offset overrides applied
    pub fn from_env() -> AppResult<Self> {
        let database_path = match std::env::var_os(DB_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };
        let mut config = Self::with_database_path(database_path);
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply locale and offset values found through `lookup`.
    ///
    /// An unknown locale or an unparseable / out-of-range offset is an error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(LOCALE_ENV) {
            self.display_locale = locale.trim().parse::<DisplayLocale>()?;
        }

        if let Some(offset) = lookup(UTC_OFFSET_ENV) {
            let minutes = offset.trim().parse::<i32>().map_err(|e| {
                AppError::Other(format!("Invalid {} '{}': {}", UTC_OFFSET_ENV, offset, e))
            })?;
            let previous = std::mem::replace(&mut self.utc_offset_minutes, minutes);
            if let Err(e) = self.utc_offset() {
                self.utc_offset_minutes = previous;
                return Err(e);
            }
        }

        Ok(())
    }

    pub fn with_database_path(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool_max_size: 4,
            duplicate_tolerance_ms: DUPLICATE_TOLERANCE_MS,
            display_locale: DisplayLocale::default(),
            utc_offset_minutes: 0,
        }
    }

    pub fn duplicate_tolerance(&self) -> Duration {
        Duration::milliseconds(self.duplicate_tolerance_ms)
    }

    pub fn utc_offset(&self) -> AppResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::Other(format!("UTC offset out of range: {} minutes", self.utc_offset_minutes))
        })
    }

    pub fn formatter(&self) -> AppResult<TimestampFormatter> {
        Ok(TimestampFormatter::new(self.display_locale, self.utc_offset()?))
    }
}

/// Default database file location
///
/// Path structure: {APP_DATA}/mediaplanner/mediaplanner.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("mediaplanner").join("mediaplanner.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::with_database_path(PathBuf::from("/tmp/planner.db"));
        assert_eq!(config.duplicate_tolerance(), Duration::seconds(1));
        assert_eq!(config.utc_offset().unwrap(), FixedOffset::east_opt(0).unwrap());
        assert_eq!(config.display_locale, DisplayLocale::EnUs);
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_overrides_set_locale_and_offset() {
        let mut config = PlannerConfig::with_database_path(PathBuf::from("/tmp/planner.db"));
        config
            .apply_overrides(lookup(&[(LOCALE_ENV, "de-DE"), (UTC_OFFSET_ENV, "-300")]))
            .unwrap();

        assert_eq!(config.display_locale, DisplayLocale::DeDe);
        assert_eq!(config.utc_offset().unwrap(), FixedOffset::west_opt(5 * 3600).unwrap());
    }

    #[test]
    fn test_missing_overrides_keep_defaults() {
        let mut config = PlannerConfig::with_database_path(PathBuf::from("/tmp/planner.db"));
        config.apply_overrides(lookup(&[])).unwrap();

        assert_eq!(config.display_locale, DisplayLocale::EnUs);
        assert_eq!(config.utc_offset_minutes, 0);
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let mut config = PlannerConfig::with_database_path(PathBuf::from("/tmp/planner.db"));
        let result = config.apply_overrides(lookup(&[(LOCALE_ENV, "xx_YY")]));
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::UnsupportedLocale(l))) if l == "xx_YY"
        ));

        assert!(config.apply_overrides(lookup(&[(UTC_OFFSET_ENV, "soon")])).is_err());
        assert!(config.apply_overrides(lookup(&[(UTC_OFFSET_ENV, "1440")])).is_err());
        assert_eq!(config.utc_offset_minutes, 0);
    }

    #[test]
    fn test_offset_out_of_range_is_an_error() {
        let mut config = PlannerConfig::with_database_path(PathBuf::from("/tmp/planner.db"));
        config.utc_offset_minutes = 24 * 60;
        assert!(config.utc_offset().is_err());
        assert!(config.formatter().is_err());
    }
}
