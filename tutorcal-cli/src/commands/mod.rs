pub mod calendar;
pub mod days;
pub mod terms;
