use anyhow::Result;
use owo_colors::OwoColorize;
use tutorcal_core::{SessionStore, YearMonth, occurrences, recurring_days};

pub fn run(store: &impl SessionStore, session_id: &str, month: Option<YearMonth>) -> Result<()> {
    let session = store.session(session_id)?;

    println!("{} ({})", session.to_string().bold(), session.frequency);

    match month {
        Some(month) => {
            let days = recurring_days(&session, month.year(), month.month())?;
            if days.is_empty() {
                println!("   {}", format!("No sessions in {month}").dimmed());
            } else {
                let list: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                println!("   {} {}: {}", month.month_name(), month.year(), list.join(", "));
            }
        }
        None => {
            let dates = occurrences(session.start_date, session.frequency, &session.weekdays)?;
            if dates.is_empty() {
                println!("   {}", "No sessions scheduled".dimmed());
            }
            for date in dates {
                println!("   {} {}", date, date.format("%A").to_string().dimmed());
            }
        }
    }

    Ok(())
}
