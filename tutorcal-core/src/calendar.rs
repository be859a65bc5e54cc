//! Month calendar assembly.
//!
//! Combines the sessions a viewer may see with their recurring days for one
//! month, producing everything a renderer needs to paint the month.

use serde::Serialize;
use tracing::debug;

use crate::error::TutorCalResult;
use crate::month::{Week, YearMonth};
use crate::recurrence::{HighlightSet, recurring_days};
use crate::session::{SessionRequest, User};
use crate::store::SessionStore;

/// What to show.
#[derive(Debug, Clone, Default)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
    /// Only sessions where this username is the student or the tutor
    pub selected_user: Option<String>,
    /// Free-text filter on student, subject and proficiency
    pub search: Option<String>,
}

/// A visible session and the days it occurs on in the queried month.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedSession {
    pub session: SessionRequest,
    pub days: HighlightSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarContext {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub month_grid: Vec<Week>,
    pub highlighted_days: HighlightSet,
    pub sessions: Vec<AnnotatedSession>,
}

impl CalendarContext {
    pub fn is_highlighted(&self, day: u32) -> bool {
        self.highlighted_days.contains(&day)
    }
}

/// Build the calendar for `viewer`.
///
/// Fails with NotFound when `selected_user` names nobody; nothing is
/// assembled in that case.
pub fn build_calendar_context(
    store: &impl SessionStore,
    viewer: &User,
    query: &CalendarQuery,
) -> TutorCalResult<CalendarContext> {
    let month = YearMonth::new(query.year, query.month)?;

    let selected = query
        .selected_user
        .as_deref()
        .map(|username| store.user(username))
        .transpose()?;

    let visible = store.visible_sessions(viewer, selected.as_ref())?;

    let mut highlighted_days = HighlightSet::new();
    let mut sessions = Vec::new();

    for session in visible {
        if let Some(search) = &query.search
            && !session.matches_search(search)
        {
            continue;
        }

        let days = recurring_days(&session, month.year(), month.month())?;
        highlighted_days.extend(days.iter().copied());
        sessions.push(AnnotatedSession { session, days });
    }

    debug!(
        viewer = %viewer.username,
        %month,
        sessions = sessions.len(),
        highlighted = highlighted_days.len(),
        "built calendar context"
    );

    Ok(CalendarContext {
        year: month.year(),
        month: month.month(),
        month_name: month.month_name(),
        month_grid: month.grid(),
        highlighted_days,
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TutorCalError;
    use crate::frequency::Frequency;
    use crate::session::{Approval, Proficiency, Role};
    use crate::weekday::Weekday;
    use chrono::NaiveDate;

    struct MemoryStore {
        users: Vec<User>,
        sessions: Vec<SessionRequest>,
    }

    impl SessionStore for MemoryStore {
        fn users(&self) -> TutorCalResult<Vec<User>> {
            Ok(self.users.clone())
        }

        fn sessions(&self) -> TutorCalResult<Vec<SessionRequest>> {
            Ok(self.sessions.clone())
        }
    }

    fn user(username: &str, role: Role) -> User {
        User {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
        }
    }

    fn session(
        id: &str,
        student: &str,
        subject: &str,
        frequency: Frequency,
        weekdays: &[Weekday],
    ) -> SessionRequest {
        SessionRequest {
            id: id.to_string(),
            student: student.to_string(),
            tutor: Some("@janedoe".to_string()),
            subject: subject.to_string(),
            proficiency: Proficiency::Beginner,
            frequency,
            weekdays: weekdays.iter().copied().collect(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 10).unwrap(),
            approval: Approval::Approved,
        }
    }

    fn store() -> MemoryStore {
        let mut pending = session("pending", "@charlie", "Maths", Frequency::Weekly, &[Weekday::Friday]);
        pending.approval = Approval::Pending;

        let mut physics = session(
            "physics",
            "@peter",
            "Physics",
            Frequency::Biweekly,
            &[Weekday::Monday, Weekday::Thursday],
        );
        physics.proficiency = Proficiency::Advanced;

        MemoryStore {
            users: vec![
                user("@johndoe", Role::Admin),
                user("@janedoe", Role::Tutor),
                user("@charlie", Role::Student),
                user("@peter", Role::Student),
            ],
            sessions: vec![
                session("python", "@charlie", "Python", Frequency::Weekly, &[Weekday::Wednesday]),
                physics,
                pending,
            ],
        }
    }

    fn query(year: i32, month: u32) -> CalendarQuery {
        CalendarQuery {
            year,
            month,
            ..Default::default()
        }
    }

    #[test]
    fn admin_sees_union_of_approved_sessions() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();
        let ctx = build_calendar_context(&store, &admin, &query(2025, 1)).unwrap();

        assert_eq!(ctx.sessions.len(), 2);
        assert_eq!(ctx.month_name, "January");
        assert_eq!(ctx.month_grid[0], [0, 0, 1, 2, 3, 4, 5]);

        for annotated in &ctx.sessions {
            assert!(annotated.days.is_subset(&ctx.highlighted_days));
        }
        let expected: HighlightSet =
            [6, 8, 9, 13, 15, 16, 20, 22, 23, 27, 29, 30].into_iter().collect();
        assert_eq!(ctx.highlighted_days, expected);
        // Friday sessions are still pending
        assert!(!ctx.is_highlighted(10));
    }

    #[test]
    fn student_sees_own_sessions_only() {
        let store = store();
        let charlie = store.user("@charlie").unwrap();
        let ctx = build_calendar_context(&store, &charlie, &query(2025, 1)).unwrap();

        assert_eq!(ctx.sessions.len(), 1);
        assert_eq!(ctx.sessions[0].session.subject, "Python");
        assert_eq!(ctx.highlighted_days, HighlightSet::from([8, 15, 22, 29]));
    }

    #[test]
    fn selected_user_narrows_admin_view() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();
        let q = CalendarQuery {
            selected_user: Some("@peter".to_string()),
            ..query(2025, 1)
        };
        let ctx = build_calendar_context(&store, &admin, &q).unwrap();

        assert_eq!(ctx.sessions.len(), 1);
        assert_eq!(ctx.sessions[0].session.id, "physics");
    }

    #[test]
    fn unknown_selected_user_is_not_found() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();
        let q = CalendarQuery {
            selected_user: Some("@ghost".to_string()),
            ..query(2025, 1)
        };
        assert!(matches!(
            build_calendar_context(&store, &admin, &q),
            Err(TutorCalError::NotFound(_))
        ));
    }

    #[test]
    fn search_filters_by_subject_and_proficiency() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();

        let by_subject = CalendarQuery {
            search: Some("physics".to_string()),
            ..query(2025, 1)
        };
        let ctx = build_calendar_context(&store, &admin, &by_subject).unwrap();
        assert_eq!(ctx.sessions.len(), 1);
        assert_eq!(ctx.sessions[0].session.subject, "Physics");

        let by_level = CalendarQuery {
            search: Some("Advanced".to_string()),
            ..query(2025, 1)
        };
        let ctx = build_calendar_context(&store, &admin, &by_level).unwrap();
        assert_eq!(ctx.sessions.len(), 1);
        assert_eq!(ctx.sessions[0].session.proficiency, Proficiency::Advanced);
    }

    #[test]
    fn break_month_has_sessions_but_no_days() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();
        let ctx = build_calendar_context(&store, &admin, &query(2025, 8)).unwrap();

        assert_eq!(ctx.sessions.len(), 2);
        assert!(ctx.sessions.iter().all(|s| s.days.is_empty()));
        assert!(ctx.highlighted_days.is_empty());
    }

    #[test]
    fn invalid_month_is_rejected() {
        let store = store();
        let admin = store.user("@johndoe").unwrap();
        assert!(matches!(
            build_calendar_context(&store, &admin, &query(2025, 0)),
            Err(TutorCalError::InvalidMonth(_))
        ));
    }

    #[test]
    fn context_serializes_to_json() {
        let store = store();
        let charlie = store.user("@charlie").unwrap();
        let ctx = build_calendar_context(&store, &charlie, &query(2025, 1)).unwrap();
        let json = serde_json::to_value(&ctx).unwrap();

        assert_eq!(json["highlighted_days"], serde_json::json!([8, 15, 22, 29]));
        assert_eq!(json["sessions"][0]["session"]["frequency"], serde_json::json!(1.0));
    }
}
