//! Academic years and their terms.
//!
//! An academic year is never stored. It is resolved from a reference date
//! (usually the date a session was requested) and always has the same
//! three terms:
//!
//! | Term   | Start  | End    |
//! |--------|--------|--------|
//! | Autumn | Sep 1  | Dec 20 |
//! | Spring | Jan 4  | Mar 31 |
//! | Summer | Apr 15 | Jul 20 |
//!
//! Both ends of every term are inclusive. Days between terms are breaks.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{TutorCalError, TutorCalResult};

/// First month (July) that belongs to the academic year starting in the same
/// calendar year. Earlier months belong to the year that started the
/// previous September.
pub const NEW_YEAR_CUTOFF_MONTH: u32 = 7;

/// How close to a term start a request can arrive before it is late.
pub const LATE_REQUEST_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TermKind {
    Autumn,
    Spring,
    Summer,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermKind::Autumn => "Autumn",
            TermKind::Spring => "Spring",
            TermKind::Summer => "Summer",
        };
        write!(f, "{name}")
    }
}

/// A contiguous run of teaching days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Term {
    pub kind: TermKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Term {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicYear {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Autumn, Spring, Summer in date order.
    pub terms: [Term; 3],
}

impl AcademicYear {
    /// Resolve the academic year a reference date belongs to.
    ///
    /// July to December starts a new academic year in the reference date's
    /// own calendar year. January to June belongs to the year that started
    /// the previous September.
    pub fn containing(reference: NaiveDate) -> TutorCalResult<Self> {
        let first_year = if reference.month() >= NEW_YEAR_CUTOFF_MONTH {
            reference.year()
        } else {
            reference.year() - 1
        };
        Self::starting_in(first_year)
    }

    /// The academic year whose autumn term starts in `year`.
    pub fn starting_in(year: i32) -> TutorCalResult<Self> {
        let next = year + 1;
        let terms = [
            Term {
                kind: TermKind::Autumn,
                start: ymd(year, 9, 1)?,
                end: ymd(year, 12, 20)?,
            },
            Term {
                kind: TermKind::Spring,
                start: ymd(next, 1, 4)?,
                end: ymd(next, 3, 31)?,
            },
            Term {
                kind: TermKind::Summer,
                start: ymd(next, 4, 15)?,
                end: ymd(next, 7, 20)?,
            },
        ];

        Ok(AcademicYear {
            start: terms[0].start,
            end: terms[2].end,
            terms,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The term a date falls in, or None during a break.
    pub fn term_for(&self, date: NaiveDate) -> Option<&Term> {
        self.terms.iter().find(|term| term.contains(date))
    }

    pub fn in_term(&self, date: NaiveDate) -> bool {
        self.term_for(date).is_some()
    }
}

impl fmt::Display for AcademicYear {
    /// Formats as "2024/25".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.start.year(), self.end.year().rem_euclid(100))
    }
}

/// A request is late when it arrives in the two weeks before a term starts.
pub fn is_request_late(requested: NaiveDate) -> TutorCalResult<bool> {
    let year = AcademicYear::containing(requested)?;
    let window = Duration::days(LATE_REQUEST_WINDOW_DAYS);

    Ok(year
        .terms
        .iter()
        .any(|term| term.start - window <= requested && requested < term.start))
}

fn ymd(year: i32, month: u32, day: u32) -> TutorCalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TutorCalError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}
