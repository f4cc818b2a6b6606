//! Time of day as seconds since the start of the service day.
//!
//! Timetables express post-midnight running as hours past 24 (`25:10:00`),
//! so offsets are not bounded by 86400.

use chrono::{
    NaiveTime,
    format::{Item, StrftimeItems},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Write},
    str::FromStr,
};

pub const SECONDS_PER_DAY: u32 = 86_400;

const DEFAULT_PATTERN: &str = "%H:%M:%S";

/// Error returned when a time string or display pattern cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeFormatError {
    input: String,
    reason: &'static str,
}

impl TimeFormatError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct TimeOffset(u32);

impl TimeOffset {
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Parses `H[:M[:S]]` into seconds since day start.
    ///
    /// Missing components count as zero and no component is range checked,
    /// so `"24:30"` is `88200` and `"00:90"` is `5400`.
    pub fn parse(input: &str) -> Result<Self, TimeFormatError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TimeFormatError::new(input, "empty time string"));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > 3 {
            return Err(TimeFormatError::new(input, "expected at most H:M:S"));
        }

        let mut total: u32 = 0;
        for (part, unit) in parts.iter().zip([3600u32, 60, 1]) {
            let value: u32 = part
                .trim()
                .parse()
                .map_err(|_| TimeFormatError::new(input, "component is not an unsigned integer"))?;
            total = value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(|| TimeFormatError::new(input, "time offset overflows"))?;
        }

        Ok(Self(total))
    }

    /// Number of midnights between the service day start and this offset.
    pub fn day_offset(&self) -> u32 {
        self.0 / SECONDS_PER_DAY
    }

    pub fn time_of_day(&self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.0 % SECONDS_PER_DAY, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Renders the wall-clock time of day; the day offset is dropped.
    pub fn format(&self, pattern: &TimePattern) -> String {
        self.time_of_day().format(&pattern.0).to_string()
    }
}

impl From<u32> for TimeOffset {
    fn from(seconds: u32) -> Self {
        Self(seconds)
    }
}

impl FromStr for TimeOffset {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time_of_day().format(DEFAULT_PATTERN))
    }
}

/// A strftime pattern that is known to render without error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimePattern(String);

impl TimePattern {
    pub fn new(pattern: &str) -> Result<Self, TimeFormatError> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(TimeFormatError::new(pattern, "unsupported format specifier"));
        }

        // Date fields parse fine but cannot render from a bare time of day.
        let mut rendered = String::new();
        write!(rendered, "{}", NaiveTime::MIN.format(pattern))
            .map_err(|_| TimeFormatError::new(pattern, "pattern needs more than a time of day"))?;

        Ok(Self(pattern.to_owned()))
    }
}

impl Default for TimePattern {
    fn default() -> Self {
        Self(DEFAULT_PATTERN.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_time() {
        assert_eq!(TimeOffset::parse("08:30:15").unwrap().seconds(), 30615);
        assert_eq!(TimeOffset::parse("00:00:00").unwrap().seconds(), 0);
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(TimeOffset::parse("7").unwrap().seconds(), 7 * 3600);
        assert_eq!(TimeOffset::parse("07:05").unwrap().seconds(), 7 * 3600 + 300);
    }

    #[test]
    fn hours_past_midnight() {
        let t: TimeOffset = "25:00:00".parse().unwrap();
        assert_eq!(t.seconds(), 90000);
        assert_eq!(t.day_offset(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimeOffset::parse("").is_err());
        assert!(TimeOffset::parse("ab:cd").is_err());
        assert!(TimeOffset::parse("1:2:3:4").is_err());
        assert!(TimeOffset::parse("-1:00").is_err());
        assert!(TimeOffset::parse("99999999:00:00").is_err());
    }

    #[test]
    fn error_display() {
        let err = TimeOffset::parse("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid time \"x\": component is not an unsigned integer"
        );
    }

    #[test]
    fn post_midnight_formats_as_next_day_hour() {
        let t = TimeOffset::from_seconds(90000);
        assert_eq!(t.to_string(), "01:00:00");
        assert_eq!(t.day_offset(), 1);

        let same_day = TimeOffset::from_seconds(82800);
        assert!(t > same_day);
        assert!(same_day < t);
        assert_eq!(t, TimeOffset::from_seconds(90000));
    }

    #[test]
    fn custom_pattern() {
        let pattern = TimePattern::new("%H:%M").unwrap();
        assert_eq!(TimeOffset::from_seconds(700).format(&pattern), "00:11");
        assert!(TimePattern::new("%Q").is_err());
    }

    #[test]
    fn date_fields_are_rejected() {
        assert!(TimePattern::new("%Y-%m-%d").is_err());
        assert!(TimePattern::new("%Y-%m-%d %H:%M").is_err());
        assert!(TimePattern::new("%H:%M:%S %p").is_ok());
    }
}
