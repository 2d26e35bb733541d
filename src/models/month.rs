//! Calendar month reference
//!
//! Months are zero-based (0 = January) throughout the ledger API. `MonthRef`
//! wraps a validated month/year pair and provides the navigation the
//! calendar view needs.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A specific calendar month, e.g. March 2024
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthRef {
    /// Always the first day of the month
    first: NaiveDate,
}

impl MonthRef {
    /// Create from a zero-based month index and a year.
    ///
    /// Returns `None` if the month is outside 0-11 or the year is out of range.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1).map(|first| Self { first })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// Zero-based month index
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Every day of the month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn days_in_month(&self) -> u32 {
        self.days().count() as u32
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month0() == self.month() && date.year() == self.year()
    }

    /// The following month; stays put at the end of the supported range
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The preceding month; stays put at the start of the supported range
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Machine form, `YYYY-MM` with a one-based month
    pub fn to_key(&self) -> String {
        self.first.format("%Y-%m").to_string()
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month '{}' (expected YYYY-MM)", self.0)
    }
}

impl std::error::Error for MonthParseError {}

impl FromStr for MonthRef {
    type Err = MonthParseError;

    /// Parse `YYYY-MM` (one-based month, as people write it)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        if month == 0 {
            return Err(err());
        }
        Self::new(month - 1, year).ok_or_else(err)
    }
}
