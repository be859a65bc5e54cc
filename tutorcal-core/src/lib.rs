//! Core types for tutorcal.
//!
//! Turns recurring tutoring requests into the concrete days they occur on:
//! - `academic_year` resolves the terms a request falls into
//! - `recurrence` expands a request into dates inside those terms
//! - `calendar` assembles a month view for a viewer from a `SessionStore`

pub mod academic_year;
pub mod calendar;
pub mod config;
pub mod error;
pub mod frequency;
pub mod month;
pub mod recurrence;
pub mod session;
pub mod store;
pub mod weekday;

pub use academic_year::{AcademicYear, Term, TermKind, is_request_late};
pub use calendar::{AnnotatedSession, CalendarContext, CalendarQuery, build_calendar_context};
pub use error::{TutorCalError, TutorCalResult};
pub use frequency::Frequency;
pub use month::YearMonth;
pub use recurrence::{HighlightSet, occurrences, recurring_days};
pub use session::{Approval, Proficiency, Role, SessionRequest, User};
pub use store::{SessionStore, TomlStore};
pub use weekday::{Weekday, WeekdaySet};
