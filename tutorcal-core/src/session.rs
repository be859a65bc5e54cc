//! Session requests and the people attached to them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TutorCalError, TutorCalResult};
use crate::frequency::Frequency;
use crate::weekday::{Weekday, WeekdaySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Handle such as "@johndoe"
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Where a request stands in the matching workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approval {
    /// No tutor matched yet, or the match awaits the tutor.
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A student's recurring tutoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub id: String,
    /// Username of the requesting student
    pub student: String,
    /// Username of the matched tutor, once there is a match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutor: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub proficiency: Proficiency,
    pub frequency: Frequency,
    #[serde(default)]
    pub weekdays: WeekdaySet,
    /// Date the request was made; anchors the academic year.
    pub start_date: NaiveDate,
    #[serde(default)]
    pub approval: Approval,
}

impl SessionRequest {
    pub fn is_approved(&self) -> bool {
        self.approval == Approval::Approved
    }

    /// Check the weekday count against the frequency.
    ///
    /// An empty set is accepted: requests may leave days open until approval.
    /// So is the every-weekday set an approved request was backfilled with.
    pub fn validate(&self) -> TutorCalResult<()> {
        let expected = self.frequency.weekday_count();
        let actual = self.weekdays.len();
        let backfilled = self.is_approved() && self.weekdays == Weekday::all();

        if actual != 0 && actual != expected && !backfilled {
            return Err(TutorCalError::InvalidWeekdayCount {
                frequency: self.frequency.name(),
                expected,
                actual,
            });
        }

        Ok(())
    }

    /// Record the tutor's approval of a match.
    ///
    /// A request approved without days is booked on every weekday. This is
    /// the only place that fallback applies; the recurrence generator never
    /// invents days.
    pub fn approve(&mut self, tutor: &str) {
        self.tutor = Some(tutor.to_string());
        self.approval = Approval::Approved;
        self.backfill_weekdays();
    }

    /// Book an approved request with no days on every weekday.
    ///
    /// Returns whether days were filled in. Pending and rejected requests
    /// are left alone.
    pub fn backfill_weekdays(&mut self) -> bool {
        if !self.is_approved() || !self.weekdays.is_empty() {
            return false;
        }
        self.weekdays = Weekday::all();
        true
    }

    /// Case-insensitive match on student username, subject or proficiency.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            self.student.to_lowercase(),
            self.subject.to_lowercase(),
            self.proficiency.to_string().to_lowercase(),
        ]
        .iter()
        .any(|field| field.contains(&query))
    }
}

impl fmt::Display for SessionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.student, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(frequency: Frequency, weekdays: &[Weekday]) -> SessionRequest {
        SessionRequest {
            id: "req-1".to_string(),
            student: "@charlie".to_string(),
            tutor: None,
            subject: "Python".to_string(),
            proficiency: Proficiency::Intermediate,
            frequency,
            weekdays: weekdays.iter().copied().collect(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 10).unwrap(),
            approval: Approval::Pending,
        }
    }

    #[test]
    fn weekday_count_follows_frequency() {
        assert!(request(Frequency::Weekly, &[Weekday::Monday]).validate().is_ok());
        assert!(
            request(Frequency::Biweekly, &[Weekday::Monday, Weekday::Thursday])
                .validate()
                .is_ok()
        );
        assert!(matches!(
            request(Frequency::Biweekly, &[Weekday::Monday]).validate(),
            Err(TutorCalError::InvalidWeekdayCount { expected: 2, actual: 1, .. })
        ));
        assert!(
            request(Frequency::Fortnightly, &[Weekday::Monday, Weekday::Friday])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn empty_weekdays_are_valid_before_approval() {
        assert!(request(Frequency::Monthly, &[]).validate().is_ok());
    }

    #[test]
    fn approval_backfills_every_weekday() {
        let mut req = request(Frequency::Weekly, &[]);
        req.approve("@tutor");
        assert!(req.is_approved());
        assert_eq!(req.tutor.as_deref(), Some("@tutor"));
        assert_eq!(req.weekdays, Weekday::all());
    }

    #[test]
    fn backfill_skips_pending_requests() {
        let mut req = request(Frequency::Weekly, &[]);
        assert!(!req.backfill_weekdays());
        assert!(req.weekdays.is_empty());

        req.approval = Approval::Approved;
        assert!(req.backfill_weekdays());
        assert!(req.validate().is_ok());
        assert!(!req.backfill_weekdays());
    }

    #[test]
    fn every_weekday_is_invalid_unless_approved() {
        let mut req = request(Frequency::Weekly, &[]);
        req.weekdays = Weekday::all();
        assert!(req.validate().is_err());
    }

    #[test]
    fn approval_keeps_requested_weekdays() {
        let mut req = request(Frequency::Weekly, &[Weekday::Wednesday]);
        req.approve("@tutor");
        assert_eq!(req.weekdays.len(), 1);
        assert!(req.weekdays.contains(&Weekday::Wednesday));
    }

    #[test]
    fn search_matches_student_subject_and_proficiency() {
        let req = request(Frequency::Weekly, &[Weekday::Monday]);
        assert!(req.matches_search("@charlie"));
        assert!(req.matches_search("python"));
        assert!(req.matches_search("INTERMEDIATE"));
        assert!(req.matches_search(""));
        assert!(!req.matches_search("Physics"));
    }
}
