mod shelter_api_client;

pub use shelter_api_client::{RecordApi, ShelterApiClient};
