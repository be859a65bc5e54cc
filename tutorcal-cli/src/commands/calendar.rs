use anyhow::Result;
use tutorcal_core::{CalendarQuery, SessionStore, User, build_calendar_context};

use crate::render::Render;

pub fn run(store: &impl SessionStore, viewer: &User, query: &CalendarQuery, json: bool) -> Result<()> {
    let context = build_calendar_context(store, viewer, query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&context)?);
    } else {
        println!("{}", context.render());
    }

    Ok(())
}
