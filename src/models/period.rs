//! Reporting periods and the date ranges derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reporting granularity for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

/// Rejected period name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time range '{0}': expected one of day, week, month, year")]
pub struct ParsePeriodError(pub String);

/// How the end of a [`TimeRange`] is treated when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// `start <= t < end`
    HalfOpen,
    /// `start <= t <= end`
    Inclusive,
}

/// A window of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// The calendar day containing `now`, from 00:00:00 to 23:59:59.999999.
    /// Meant to be queried with [`Bounds::Inclusive`].
    pub fn day_of(now: NaiveDateTime) -> Self {
        let date = now.date();
        let end_of_day =
            NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
        Self {
            start: date.and_time(NaiveTime::MIN),
            end: date.and_time(end_of_day),
        }
    }
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// `from` moved back by `units` of this period. Months and years are
    /// calendar arithmetic and clamp to the end of shorter months.
    pub fn step_back(&self, from: NaiveDateTime, units: u32) -> NaiveDateTime {
        let shifted = match self {
            Period::Day => from.checked_sub_signed(Duration::days(i64::from(units))),
            Period::Week => from.checked_sub_signed(Duration::weeks(i64::from(units))),
            Period::Month => from.checked_sub_months(Months::new(units)),
            Period::Year => from.checked_sub_months(Months::new(units.saturating_mul(12))),
        };
        shifted.unwrap_or(NaiveDateTime::MIN)
    }

    /// Date range for this period ending at `now`, or the equally long
    /// window right before it when `previous` is set.
    pub fn range(&self, now: NaiveDateTime, previous: bool) -> TimeRange {
        if previous {
            TimeRange {
                start: self.step_back(now, 2),
                end: self.step_back(now, 1),
            }
        } else {
            TimeRange {
                start: self.step_back(now, 1),
                end: now,
            }
        }
    }

    pub fn current_range(&self, now: NaiveDateTime) -> TimeRange {
        self.range(now, false)
    }

    pub fn previous_range(&self, now: NaiveDateTime) -> TimeRange {
        self.range(now, true)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}
