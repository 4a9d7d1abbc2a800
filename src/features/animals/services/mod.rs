mod mutation_service;
mod record_store;

pub use mutation_service::{Confirm, MutationService};
pub use record_store::{LoadOutcome, RecordStore};
