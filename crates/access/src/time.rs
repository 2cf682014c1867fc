//! Calendar date and wall-clock time value objects.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use hostelgate_core::{DomainError, DomainResult, ValueObject};

const TIME_FORMAT: &str = "%H:%M:%S";
const FILE_STEM_FORMAT: &str = "%d_%m_%Y";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Wall-clock time of a gate action, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl ValueObject for TimeOfDay {}

impl TimeOfDay {
    /// Truncates sub-second precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    pub fn from_hms(hour: u32, min: u32, sec: u32) -> DomainResult<Self> {
        NaiveTime::from_hms_opt(hour, min, sec)
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("invalid time {hour}:{min}:{sec}")))
    }

    pub fn parse(text: &str) -> DomainResult<Self> {
        NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
            .map(Self::from_naive)
            .map_err(|e| DomainError::validation(format!("invalid time '{text}': {e}")))
    }

    /// Parse a stored time slot: blank or whitespace-only means "not filled".
    pub fn parse_slot(text: Option<&str>) -> DomainResult<Option<Self>> {
        match text.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl core::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Local calendar date selecting one day ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerDate(NaiveDate);

impl ValueObject for LedgerDate {}

impl LedgerDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("invalid date {year}-{month}-{day}")))
    }

    /// Split a local timestamp into the day it belongs to and its time.
    pub fn split(at: NaiveDateTime) -> (LedgerDate, TimeOfDay) {
        (Self(at.date()), TimeOfDay::from_naive(at.time()))
    }

    /// `DD_MM_YYYY`, the on-disk naming convention for day files.
    pub fn file_stem(&self) -> String {
        self.0.format(FILE_STEM_FORMAT).to_string()
    }

    pub fn parse_file_stem(stem: &str) -> DomainResult<Self> {
        NaiveDate::parse_from_str(stem, FILE_STEM_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid day file name '{stem}': {e}")))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl core::fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slots_are_unfilled() {
        assert_eq!(TimeOfDay::parse_slot(None).unwrap(), None);
        assert_eq!(TimeOfDay::parse_slot(Some("")).unwrap(), None);
        assert_eq!(TimeOfDay::parse_slot(Some("   \t")).unwrap(), None);
        assert_eq!(
            TimeOfDay::parse_slot(Some(" 09:00:00 ")).unwrap(),
            Some(TimeOfDay::from_hms(9, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_slot_is_a_validation_error() {
        match TimeOfDay::parse_slot(Some("nine o'clock")).unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let t = NaiveTime::from_hms_milli_opt(18, 30, 0, 750).unwrap();
        assert_eq!(TimeOfDay::from_naive(t).to_string(), "18:30:00");
    }

    #[test]
    fn file_stem_round_trips() {
        let date = LedgerDate::from_ymd(2024, 3, 7).unwrap();
        assert_eq!(date.file_stem(), "07_03_2024");
        assert_eq!(date.to_string(), "07/03/2024");
        assert_eq!(LedgerDate::parse_file_stem("07_03_2024").unwrap(), date);
    }

    #[test]
    fn time_serializes_as_text() {
        let t = TimeOfDay::from_hms(20, 0, 5).unwrap();
        assert_eq!(serde_json::to_value(t).unwrap(), serde_json::json!("20:00:05"));
    }
}
