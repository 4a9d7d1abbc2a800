mod animal;

pub use animal::{parse_age_days, AdoptionStatus, AnimalId, AnimalRecord, Gender, Sterilized};
