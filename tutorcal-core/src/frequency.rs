//! Session cadence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TutorCalError, TutorCalResult};

/// How often a session recurs.
///
/// The multiplier is the number of sessions per week. Stored and exchanged
/// as that decimal (0.25, 0.5, 1.0, 2.0) or as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "f64")]
pub enum Frequency {
    Monthly,
    Fortnightly,
    Weekly,
    Biweekly,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrequencyRepr {
    Multiplier(f64),
    Label(String),
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Monthly,
        Frequency::Fortnightly,
        Frequency::Weekly,
        Frequency::Biweekly,
    ];

    /// Sessions per week.
    pub fn multiplier(self) -> f64 {
        match self {
            Frequency::Monthly => 0.25,
            Frequency::Fortnightly => 0.5,
            Frequency::Weekly => 1.0,
            Frequency::Biweekly => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Fortnightly => "Fortnightly",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
        }
    }

    /// Days the stepper advances after an occurrence.
    ///
    /// Biweekly sessions run on two weekdays inside the same week, so the
    /// stepper moves one day at a time and lets weekday membership pick
    /// the days.
    pub fn interval_days(self) -> i64 {
        match self {
            Frequency::Biweekly => 1,
            Frequency::Weekly => 7,
            Frequency::Fortnightly => 14,
            Frequency::Monthly => 28,
        }
    }

    /// Number of weekdays a session with this cadence is booked on.
    pub fn weekday_count(self) -> usize {
        match self {
            Frequency::Biweekly => 2,
            _ => 1,
        }
    }

    /// Look up a frequency by its multiplier.
    pub fn from_multiplier(value: f64) -> TutorCalResult<Self> {
        Frequency::ALL
            .into_iter()
            .find(|f| (f.multiplier() - value).abs() < 1e-9)
            .ok_or_else(|| TutorCalError::InvalidFrequency(value.to_string()))
    }

    /// Look up a frequency by its label, ignoring case.
    pub fn from_label(label: &str) -> TutorCalResult<Self> {
        let label = label.trim();
        Frequency::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(label))
            .ok_or_else(|| TutorCalError::InvalidFrequency(format!("'{label}'")))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = TutorCalError;

    /// Accepts either a label ("weekly") or a multiplier ("1.0").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(value) => Frequency::from_multiplier(value),
            Err(_) => Frequency::from_label(s),
        }
    }
}

impl TryFrom<f64> for Frequency {
    type Error = TutorCalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Frequency::from_multiplier(value)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parsed = match FrequencyRepr::deserialize(deserializer)? {
            FrequencyRepr::Multiplier(value) => Frequency::from_multiplier(value),
            FrequencyRepr::Label(label) => label.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

impl From<Frequency> for f64 {
    fn from(frequency: Frequency) -> Self {
        frequency.multiplier()
    }
}
