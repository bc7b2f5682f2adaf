//! Timestamp display policy.
//!
//! Records carry UTC timestamps. Converting them for display uses an
//! explicit, configurable offset; there is no hidden regional shift.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest absolute offset accepted, in minutes (just under a day).
pub const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// How a timestamp is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// "Jan 5, 2025"
    #[default]
    Short,
    /// "January 5, 2025"
    Long,
    /// "Jan 5, 2025, 09:30 AM"
    DateTime,
}

impl DateStyle {
    fn pattern(&self) -> &'static str {
        match self {
            DateStyle::Short => "%b %-d, %Y",
            DateStyle::Long => "%B %-d, %Y",
            DateStyle::DateTime => "%b %-d, %Y, %I:%M %p",
        }
    }
}

impl std::str::FromStr for DateStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(DateStyle::Short),
            "long" => Ok(DateStyle::Long),
            "date_time" => Ok(DateStyle::DateTime),
            other => Err(ValidationError::InvalidValue {
                field: "date_style".to_string(),
                message: format!("expected short, long or date_time, got '{other}'"),
            }),
        }
    }
}

/// Fixed UTC offset used when showing timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTimezone {
    offset: FixedOffset,
}

impl DisplayTimezone {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Offset east of UTC in minutes.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "utc_offset_minutes".to_string(),
                message: format!("{minutes} is outside -{MAX_OFFSET_MINUTES}..={MAX_OFFSET_MINUTES}"),
            });
        }
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| ValidationError::InvalidValue {
            field: "utc_offset_minutes".to_string(),
            message: format!("{minutes} is not a valid offset"),
        })?;
        Ok(Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn localize(&self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset)
    }

    pub fn format(&self, ts: DateTime<Utc>, style: DateStyle) -> String {
        self.localize(ts).format(style.pattern()).to_string()
    }
}

impl Default for DisplayTimezone {
    fn default() -> Self {
        Self::utc()
    }
}
