//! Category counts over a record set.
//!
//! Every function here is a pure fold over the records it is given; the
//! order of the input only affects label order, never the counts.

use crate::features::animals::models::AnimalRecord;
use crate::features::stats::models::{AgeBracket, Distribution, Distributions};

pub fn status_counts(records: &[AnimalRecord]) -> Distribution {
    records.iter().map(|r| r.status.as_str()).collect()
}

pub fn breed_counts(records: &[AnimalRecord]) -> Distribution {
    records.iter().map(|r| r.primary_breed.as_str()).collect()
}

pub fn gender_counts(records: &[AnimalRecord]) -> Distribution {
    records.iter().map(|r| r.gender.as_str()).collect()
}

pub fn sterilized_counts(records: &[AnimalRecord]) -> Distribution {
    records.iter().map(|r| r.sterilized.as_str()).collect()
}

/// Counts keyed by bracket name ("Kitten", "Young", ...)
pub fn age_bracket_counts(records: &[AnimalRecord]) -> Distribution {
    records
        .iter()
        .map(|r| {
            let bracket = AgeBracket::from_age(r.age_days);
            if bracket == AgeBracket::Unknown {
                tracing::warn!("Cat {} has an unreadable age; counted as Unknown", r.id);
            }
            bracket.name()
        })
        .collect()
}

pub fn summarize(records: &[AnimalRecord]) -> Distributions {
    Distributions {
        status: status_counts(records),
        breed: breed_counts(records),
        age_bracket: age_bracket_counts(records),
        gender: gender_counts(records),
        sterilized: sterilized_counts(records),
    }
}
