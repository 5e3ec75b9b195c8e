use chrono::{DateTime, FixedOffset, Locale, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// Locales with a known medium-date / short-time pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "en_GB")]
    EnGb,
    #[serde(rename = "de_DE")]
    DeDe,
    #[serde(rename = "fr_FR")]
    FrFr,
    #[serde(rename = "ru_RU")]
    RuRu,
}

impl DisplayLocale {
    fn pattern(&self) -> &'static str {
        match self {
            DisplayLocale::EnUs => "%b %-d, %Y at %-I:%M %p",
            DisplayLocale::EnGb => "%-d %b %Y at %H:%M",
            DisplayLocale::DeDe => "%d.%m.%Y, %H:%M",
            DisplayLocale::FrFr => "%-d %b %Y à %H:%M",
            DisplayLocale::RuRu => "%-d %b %Y г., %H:%M",
        }
    }

    fn chrono_locale(&self) -> Locale {
        match self {
            DisplayLocale::EnUs => Locale::en_US,
            DisplayLocale::EnGb => Locale::en_GB,
            DisplayLocale::DeDe => Locale::de_DE,
            DisplayLocale::FrFr => Locale::fr_FR,
            DisplayLocale::RuRu => Locale::ru_RU,
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = DomainError;

    /// Accepts both "en_US" and "en-US" spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "en_US" => Ok(DisplayLocale::EnUs),
            "en_GB" => Ok(DisplayLocale::EnGb),
            "de_DE" => Ok(DisplayLocale::DeDe),
            "fr_FR" => Ok(DisplayLocale::FrFr),
            "ru_RU" => Ok(DisplayLocale::RuRu),
            _ => Err(DomainError::UnsupportedLocale(s.to_string())),
        }
    }
}

/// Formats reminder timestamps for display.
///
/// Pure: the same (date, locale, offset) always yields the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormatter {
    locale: DisplayLocale,
    offset: FixedOffset,
}

impl TimestampFormatter {
    pub fn new(locale: DisplayLocale, offset: FixedOffset) -> Self {
        Self { locale, offset }
    }

    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Medium date plus short time, in the formatter's locale and offset
    pub fn format(&self, date: DateTime<Utc>) -> String {
        date.with_timezone(&self.offset)
            .format_localized(self.locale.pattern(), self.locale.chrono_locale())
            .to_string()
    }

    /// Calendar day the timestamp falls on, in the formatter's offset
    pub fn local_day(&self, date: DateTime<Utc>) -> NaiveDate {
        local_day(date, self.offset)
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(DisplayLocale::default(), Utc.fix())
    }
}

pub fn local_day(date: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    date.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_en_us_medium_date_short_time() {
        let formatter = TimestampFormatter::default();
        assert_eq!(formatter.format(morning()), "Jan 1, 2025 at 10:00 AM");
    }

    #[test]
    fn test_de_de_numeric_pattern() {
        let formatter = TimestampFormatter::new(DisplayLocale::DeDe, Utc.fix());
        assert_eq!(formatter.format(morning()), "01.01.2025, 10:00");
    }

    #[test]
    fn test_offset_is_applied() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let formatter = TimestampFormatter::new(DisplayLocale::DeDe, offset);
        assert_eq!(formatter.format(morning()), "01.01.2025, 13:00");
    }

    #[test]
    fn test_format_is_deterministic() {
        let formatter = TimestampFormatter::new(DisplayLocale::RuRu, Utc.fix());
        let date = Utc::now();
        assert_eq!(formatter.format(date), formatter.format(date));
    }

    #[test]
    fn test_local_day_crosses_midnight() {
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap();
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(local_day(late, offset), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(local_day(late, Utc.fix()), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en-GB".parse::<DisplayLocale>().unwrap(), DisplayLocale::EnGb);
        assert_eq!("ru_RU".parse::<DisplayLocale>().unwrap(), DisplayLocale::RuRu);
        assert!("xx_YY".parse::<DisplayLocale>().is_err());
    }
}
