//! School weekdays a session can be booked on.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TutorCalError;

/// A teaching day. Sessions never run at weekends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// The weekdays configured for one session.
pub type WeekdaySet = BTreeSet<Weekday>;

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Every teaching day, used to backfill sessions approved without days.
    pub fn all() -> WeekdaySet {
        Weekday::ALL.into_iter().collect()
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
        }
    }
}

impl TryFrom<chrono::Weekday> for Weekday {
    type Error = TutorCalError;

    fn try_from(day: chrono::Weekday) -> Result<Self, Self::Error> {
        match day {
            chrono::Weekday::Mon => Ok(Weekday::Monday),
            chrono::Weekday::Tue => Ok(Weekday::Tuesday),
            chrono::Weekday::Wed => Ok(Weekday::Wednesday),
            chrono::Weekday::Thu => Ok(Weekday::Thursday),
            chrono::Weekday::Fri => Ok(Weekday::Friday),
            weekend => Err(TutorCalError::InvalidWeekday(format!("{weekend:?}"))),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weekday {
    type Err = TutorCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TutorCalError::InvalidWeekday(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("thursday".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!(" FRIDAY ".parse::<Weekday>().unwrap(), Weekday::Friday);
    }

    #[test]
    fn weekend_days_are_rejected() {
        assert!("Saturday".parse::<Weekday>().is_err());
        assert!(Weekday::try_from(chrono::Weekday::Sun).is_err());
    }

    #[test]
    fn chrono_conversion_matches_calendar() {
        // 2025-01-06 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(Weekday::try_from(monday.weekday()).unwrap(), Weekday::Monday);
        for day in Weekday::ALL {
            assert_eq!(Weekday::try_from(chrono::Weekday::from(day)).unwrap(), day);
        }
    }

    #[test]
    fn deserializes_names_case_insensitively() {
        let days: WeekdaySet = serde_json::from_str(r#"["monday", "THURSDAY"]"#).unwrap();
        assert_eq!(days, WeekdaySet::from([Weekday::Monday, Weekday::Thursday]));
        assert!(serde_json::from_str::<Weekday>(r#""Sunday""#).is_err());
        assert_eq!(serde_json::to_string(&Weekday::Friday).unwrap(), r#""Friday""#);
    }

    #[test]
    fn all_is_monday_to_friday() {
        let all = Weekday::all();
        assert_eq!(all.len(), 5);
        assert_eq!(all.first(), Some(&Weekday::Monday));
        assert_eq!(all.last(), Some(&Weekday::Friday));
    }
}
