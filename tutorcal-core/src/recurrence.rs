//! Recurring session expansion.
//!
//! Walks an academic year day by day and lands on every in-term date a
//! session occurs on. After an occurrence the cursor jumps by the
//! frequency's interval; anywhere else it creeps forward one day. That
//! keeps the cadence inside a term and restarts it at the first booked
//! weekday of the next term, with no make-up dates for the break.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::academic_year::AcademicYear;
use crate::error::TutorCalResult;
use crate::frequency::Frequency;
use crate::month::YearMonth;
use crate::session::SessionRequest;
use crate::weekday::{Weekday, WeekdaySet};

/// Days of a month to highlight on a calendar.
pub type HighlightSet = BTreeSet<u32>;

/// Every date a session occurs on during the academic year of `start_date`,
/// in order.
///
/// An empty weekday set yields no dates.
pub fn occurrences(
    start_date: NaiveDate,
    frequency: Frequency,
    weekdays: &WeekdaySet,
) -> TutorCalResult<Vec<NaiveDate>> {
    let year = AcademicYear::containing(start_date)?;

    if weekdays.is_empty() {
        debug!(%start_date, "no weekdays configured, nothing to expand");
        return Ok(Vec::new());
    }

    let interval = Duration::days(frequency.interval_days());
    let mut cursor = year.start;
    let mut dates = Vec::new();

    while cursor <= year.end {
        if is_booked(cursor, weekdays) && year.in_term(cursor) {
            dates.push(cursor);
            cursor += interval;
        } else {
            cursor += Duration::days(1);
        }
    }

    debug!(
        academic_year = %year,
        %frequency,
        count = dates.len(),
        "expanded session occurrences"
    );

    Ok(dates)
}

/// Occurrences of a session within one month.
pub fn occurrences_in(session: &SessionRequest, month: YearMonth) -> TutorCalResult<Vec<NaiveDate>> {
    Ok(occurrences(session.start_date, session.frequency, &session.weekdays)?
        .into_iter()
        .filter(|date| month.contains(*date))
        .collect())
}

/// Days of `year`-`month` on which the session occurs.
///
/// A month that lies in a break, or outside the session's academic year,
/// gives an empty set.
pub fn recurring_days(session: &SessionRequest, year: i32, month: u32) -> TutorCalResult<HighlightSet> {
    let month = YearMonth::new(year, month)?;

    Ok(occurrences_in(session, month)?
        .into_iter()
        .map(|date| date.day())
        .collect())
}

fn is_booked(date: NaiveDate, weekdays: &WeekdaySet) -> bool {
    Weekday::try_from(date.weekday()).is_ok_and(|day| weekdays.contains(&day))
}
