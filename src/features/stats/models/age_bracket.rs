use serde::{Deserialize, Serialize};

/// Fixed age categories for the age chart.
///
/// Thresholds are half-open and checked in order: `< 180`, `< 365`, `< 1825`,
/// otherwise Senior. Records whose age could not be read go to `Unknown`
/// rather than falling through to Senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    Kitten,
    Young,
    Adult,
    Senior,
    Unknown,
}

const THRESHOLDS: [(u32, AgeBracket); 3] = [
    (180, AgeBracket::Kitten),
    (365, AgeBracket::Young),
    (1825, AgeBracket::Adult),
];

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Kitten,
        AgeBracket::Young,
        AgeBracket::Adult,
        AgeBracket::Senior,
        AgeBracket::Unknown,
    ];

    pub fn from_days(age_days: u32) -> Self {
        THRESHOLDS
            .iter()
            .find(|(upper, _)| age_days < *upper)
            .map(|(_, bracket)| *bracket)
            .unwrap_or(AgeBracket::Senior)
    }

    pub fn from_age(age_days: Option<u32>) -> Self {
        age_days.map_or(AgeBracket::Unknown, Self::from_days)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgeBracket::Kitten => "Kitten",
            AgeBracket::Young => "Young",
            AgeBracket::Adult => "Adult",
            AgeBracket::Senior => "Senior",
            AgeBracket::Unknown => "Unknown",
        }
    }

    /// Chart legend text
    pub fn legend(&self) -> &'static str {
        match self {
            AgeBracket::Kitten => "Kitten (<6 months)",
            AgeBracket::Young => "Young (6 months - 1 year)",
            AgeBracket::Adult => "Adult (1-5 years)",
            AgeBracket::Senior => "Senior (>5 years)",
            AgeBracket::Unknown => "Unknown age",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
