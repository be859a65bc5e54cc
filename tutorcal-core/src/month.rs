//! Calendar months and the Monday-first grid used to draw them.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{TutorCalError, TutorCalResult};

/// One row of a month grid. Cells outside the month hold 0.
pub type Week = [u32; 7];

/// A calendar month, held as its first day so it is always a real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> TutorCalResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| YearMonth { first })
            .ok_or_else(|| TutorCalError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1..=12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        let next = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        next.signed_duration_since(first).num_days() as u32
    }

    /// English month name, e.g. "January".
    pub fn month_name(&self) -> String {
        self.first_day().format("%B").to_string()
    }

    /// Week-major grid of day numbers, Monday first, 0 outside the month.
    pub fn grid(&self) -> Vec<Week> {
        let lead = self.first_day().weekday().num_days_from_monday() as usize;
        let days = self.days_in_month() as usize;
        let cells = (lead + days).div_ceil(7) * 7;

        (0..cells)
            .map(|cell| {
                if cell < lead || cell >= lead + days {
                    0
                } else {
                    (cell - lead + 1) as u32
                }
            })
            .collect::<Vec<_>>()
            .chunks(7)
            .map(|chunk| {
                let mut week = [0; 7];
                week.copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = TutorCalError;

    /// Parse YYYY-MM
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TutorCalError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> TutorCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TutorCalError::InvalidDate(s.to_string()))
}
