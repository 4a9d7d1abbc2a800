pub mod clients;
pub mod dtos;
pub mod events;
pub mod models;
pub mod services;

pub use clients::{RecordApi, ShelterApiClient};
pub use events::StoreEvent;
pub use services::{Confirm, MutationService, RecordStore};
