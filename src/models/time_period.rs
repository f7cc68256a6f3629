//! Named time periods used to filter prices and invoices.
//!
//! A [`TimePeriod`] resolves, relative to a UTC instant, to a half-open
//! [`TimeWindow`] `[start, end)`. Either bound may be open.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use frank_energie::TimePeriod;
//!
//! let now = Utc.with_ymd_and_hms(2023, 6, 1, 10, 30, 0).unwrap();
//! let window = TimePeriod::Before6am.window_at(now);
//!
//! assert_eq!(window.start(), Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()));
//! assert_eq!(window.end(), Some(Utc.with_ymd_and_hms(2023, 6, 1, 6, 0, 0).unwrap()));
//!
//! let period: TimePeriod = "tomorrow_after_6am".parse().unwrap();
//! assert_eq!(period, TimePeriod::TomorrowAfter6am);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, DurationRound, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dates::start_of_day;

/// A named period relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    /// The hour before the current hour.
    PreviousHour,
    /// The current hour.
    CurrentHour,
    /// The hour after the current hour.
    NextHour,
    /// The previous day.
    Yesterday,
    /// The current day.
    Today,
    /// The next day.
    Tomorrow,
    /// Every hour after the current one.
    Upcoming,
    /// Today before 06:00.
    #[serde(rename = "before_6am")]
    Before6am,
    /// Today from 06:00.
    #[serde(rename = "after_6am")]
    After6am,
    /// Tomorrow before 06:00.
    #[serde(rename = "tomorrow_before_6am")]
    TomorrowBefore6am,
    /// Tomorrow from 06:00.
    #[serde(rename = "tomorrow_after_6am")]
    TomorrowAfter6am,
    /// The previous calendar month.
    PreviousMonth,
    /// The current calendar month.
    CurrentMonth,
    /// The next calendar month.
    NextMonth,
    /// The current calendar year.
    CurrentYear,
    /// The previous calendar year.
    PreviousYear,
    /// No bounds.
    AllTime,
}

/// Error returned when parsing an unknown period name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown time period '{0}'.")]
pub struct ParseTimePeriodError(String);

/// A half-open UTC window `[start, end)`; `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns `true` if `instant` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant < end)
    }

    /// Returns `true` if the interval `[from, till)` lies entirely within the window.
    #[must_use]
    pub fn contains_interval(&self, from: DateTime<Utc>, till: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| from >= start) && self.end.map_or(true, |end| till <= end)
    }
}

impl TimePeriod {
    /// Every period, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::PreviousHour,
        Self::CurrentHour,
        Self::NextHour,
        Self::Yesterday,
        Self::Today,
        Self::Tomorrow,
        Self::Upcoming,
        Self::Before6am,
        Self::After6am,
        Self::TomorrowBefore6am,
        Self::TomorrowAfter6am,
        Self::PreviousMonth,
        Self::CurrentMonth,
        Self::NextMonth,
        Self::CurrentYear,
        Self::PreviousYear,
        Self::AllTime,
    ];

    /// Returns the snake_case name of the period.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PreviousHour => "previous_hour",
            Self::CurrentHour => "current_hour",
            Self::NextHour => "next_hour",
            Self::Yesterday => "yesterday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Upcoming => "upcoming",
            Self::Before6am => "before_6am",
            Self::After6am => "after_6am",
            Self::TomorrowBefore6am => "tomorrow_before_6am",
            Self::TomorrowAfter6am => "tomorrow_after_6am",
            Self::PreviousMonth => "previous_month",
            Self::CurrentMonth => "current_month",
            Self::NextMonth => "next_month",
            Self::CurrentYear => "current_year",
            Self::PreviousYear => "previous_year",
            Self::AllTime => "all_time",
        }
    }

    /// Resolves the period relative to the current time.
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window_at(Utc::now())
    }

    /// Resolves the period relative to `now`.
    #[must_use]
    pub fn window_at(&self, now: DateTime<Utc>) -> TimeWindow {
        let hour = now.duration_trunc(Duration::hours(1)).unwrap_or(now);
        let today = start_of_day(now.date_naive());
        let tomorrow = today + Duration::days(1);
        let six_hours = Duration::hours(6);

        let bounded =
            |start: DateTime<Utc>, end: DateTime<Utc>| TimeWindow::new(Some(start), Some(end));

        match self {
            Self::PreviousHour => bounded(hour - Duration::hours(1), hour),
            Self::CurrentHour => bounded(hour, hour + Duration::hours(1)),
            Self::NextHour => bounded(hour + Duration::hours(1), hour + Duration::hours(2)),
            Self::Upcoming => TimeWindow::new(Some(hour + Duration::hours(1)), None),
            Self::Yesterday => bounded(today - Duration::days(1), today),
            Self::Today => bounded(today, tomorrow),
            Self::Tomorrow => bounded(tomorrow, tomorrow + Duration::days(1)),
            Self::Before6am => bounded(today, today + six_hours),
            Self::After6am => bounded(today + six_hours, tomorrow),
            Self::TomorrowBefore6am => bounded(tomorrow, tomorrow + six_hours),
            Self::TomorrowAfter6am => bounded(tomorrow + six_hours, tomorrow + Duration::days(1)),
            Self::PreviousMonth | Self::CurrentMonth | Self::NextMonth => {
                self.month_window(now.date_naive())
            }
            Self::CurrentYear => year_window(now.year()),
            Self::PreviousYear => year_window(now.year() - 1),
            Self::AllTime => TimeWindow::new(None, None),
        }
    }

    fn month_window(self, date: NaiveDate) -> TimeWindow {
        let first = date.with_day(1).unwrap_or(date);
        let one = Months::new(1);
        let (start, end) = match self {
            Self::PreviousMonth => (first.checked_sub_months(one), Some(first)),
            Self::NextMonth => (
                first.checked_add_months(one),
                first.checked_add_months(Months::new(2)),
            ),
            _ => (Some(first), first.checked_add_months(one)),
        };
        TimeWindow::new(start.map(start_of_day), end.map(start_of_day))
    }
}

fn year_window(year: i32) -> TimeWindow {
    TimeWindow::new(
        NaiveDate::from_yo_opt(year, 1).map(start_of_day),
        NaiveDate::from_yo_opt(year + 1, 1).map(start_of_day),
    )
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ParseTimePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| ParseTimePeriodError(s.to_string()))
    }
}
