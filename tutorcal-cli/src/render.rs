//! Terminal rendering for tutorcal types.
//!
//! Extension traits that add colored output to tutorcal-core types using
//! owo_colors.

use owo_colors::OwoColorize;
use tutorcal_core::{AcademicYear, AnnotatedSession, CalendarContext, HighlightSet, WeekdaySet};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

impl Render for CalendarContext {
    fn render(&self) -> String {
        let title = format!("{} {}", self.month_name, self.year);
        let mut lines = vec![
            format!("{:^20}", title).bold().to_string(),
            WEEKDAY_HEADER.dimmed().to_string(),
        ];

        for week in &self.month_grid {
            let cells: Vec<String> = week
                .iter()
                .map(|&day| match day {
                    0 => "  ".to_string(),
                    d if self.is_highlighted(d) => format!("{d:>2}").green().bold().to_string(),
                    d => format!("{d:>2}"),
                })
                .collect();
            lines.push(cells.join(" "));
        }

        lines.push(String::new());

        if self.sessions.is_empty() {
            lines.push("No sessions".dimmed().to_string());
        } else {
            lines.extend(self.sessions.iter().map(Render::render));
        }

        lines.join("\n")
    }
}

impl Render for AnnotatedSession {
    fn render(&self) -> String {
        let session = &self.session;
        let tutor = session.tutor.as_deref().unwrap_or("(no tutor)");
        let cadence = format!(
            "({}, {}, {})",
            session.frequency,
            render_weekdays(&session.weekdays),
            session.proficiency
        );

        format!(
            "📚 {} {} {} {}\n   {}",
            session.subject.bold(),
            session.student,
            format!("with {tutor}").dimmed(),
            cadence.dimmed(),
            render_days(&self.days)
        )
    }
}

impl Render for AcademicYear {
    fn render(&self) -> String {
        let mut lines = vec![format!("🎓 Academic year {}", self).bold().to_string()];

        for term in &self.terms {
            lines.push(format!(
                "   {:<7} {} → {}",
                term.kind.to_string(),
                term.start.format("%a %-d %b %Y"),
                term.end.format("%a %-d %b %Y")
            ));
        }

        lines.join("\n")
    }
}

fn render_weekdays(weekdays: &WeekdaySet) -> String {
    if weekdays.is_empty() {
        return "no days".to_string();
    }
    weekdays.iter().map(|d| d.name()).collect::<Vec<_>>().join(" & ")
}

fn render_days(days: &HighlightSet) -> String {
    if days.is_empty() {
        return "No sessions this month".dimmed().to_string();
    }
    days.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
        .green()
        .to_string()
}
