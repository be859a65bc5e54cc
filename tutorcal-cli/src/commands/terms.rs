use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tutorcal_core::{AcademicYear, is_request_late};

use crate::render::Render;

pub fn run(date: NaiveDate) -> Result<()> {
    let year = AcademicYear::containing(date)?;

    println!("{}", year.render());
    println!();

    match year.term_for(date) {
        Some(term) => println!("{} is in the {} term", date, term.kind),
        None => println!("{} is {}", date, "outside term time".yellow()),
    }

    if is_request_late(date)? {
        println!(
            "{}",
            "A request made on this date is late: the next term starts within two weeks".red()
        );
    }

    Ok(())
}
