#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use crate::core::error::{AppError, Result};

#[cfg(test)]
use crate::features::animals::clients::RecordApi;

#[cfg(test)]
use crate::features::animals::dtos::{CreatedAnimal, DraftRecord};

#[cfg(test)]
use crate::features::animals::models::{AdoptionStatus, AnimalId, AnimalRecord, Gender, Sterilized};

#[cfg(test)]
pub fn sample_record(id: &str, status: &str) -> AnimalRecord {
    AnimalRecord {
        id: AnimalId::new(id),
        name: format!("Cat {}", id),
        age_days: Some(200),
        gender: Gender::Female,
        sterilized: Sterilized::Yes,
        primary_breed: "Tabby".to_string(),
        primary_color: "Grey".to_string(),
        intake_type: "Stray".to_string(),
        intake_condition: "Normal".to_string(),
        status: status.parse::<AdoptionStatus>().unwrap(),
        adoption_chance: Some(50),
        images: vec![format!("{}.jpg", id)],
    }
}

/// In-memory stand-in for the shelter service.
///
/// Creates and deletes change the served collection the way the real
/// service would, so a follow-up fetch sees the effect.
#[cfg(test)]
#[derive(Default)]
pub struct FakeRecordApi {
    records: Mutex<Vec<AnimalRecord>>,
    fetch_error: Mutex<Option<String>>,
    create_error: Mutex<Option<String>>,
    delete_error: Mutex<Option<String>>,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

#[cfg(test)]
#[allow(dead_code)]
impl FakeRecordApi {
    pub fn with_records(records: Vec<AnimalRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn set_records(&self, records: Vec<AnimalRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_fetch(&self, message: &str) {
        *self.fetch_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_create(&self, message: &str) {
        *self.create_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        *self.delete_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn served_len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl RecordApi for FakeRecordApi {
    async fn fetch_all(&self) -> Result<Vec<AnimalRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fetch_error.lock().unwrap().clone() {
            return Err(AppError::LoadFailure(message));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, draft: &DraftRecord) -> Result<CreatedAnimal> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.create_error.lock().unwrap().clone() {
            return Err(AppError::MutationFailure(message));
        }

        let mut records = self.records.lock().unwrap();
        let id = AnimalId::new(format!("srv-{}", records.len() + 1));
        records.push(AnimalRecord {
            id: id.clone(),
            name: draft.name.clone(),
            age_days: draft.age_days.parse().ok(),
            gender: Gender::from(Some(draft.gender.clone())),
            sterilized: Sterilized::from(Some(draft.sterilized.clone())),
            primary_breed: draft.primary_breed.clone(),
            primary_color: draft.primary_color.clone(),
            intake_type: draft.intake_type.clone(),
            intake_condition: draft.intake_condition.clone(),
            status: draft
                .status
                .parse()
                .map_err(|e: String| AppError::MutationFailure(e))?,
            adoption_chance: Some(64),
            images: draft
                .attachments
                .iter()
                .map(|a| a.file_name.clone())
                .collect(),
        });

        Ok(CreatedAnimal {
            id: Some(id),
            adoption_chance: Some(64.0),
            message: Some("Cat added successfully".to_string()),
        })
    }

    async fn delete(&self, id: &AnimalId) -> Result<String> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.delete_error.lock().unwrap().clone() {
            return Err(AppError::MutationFailure(message));
        }

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(AppError::MutationFailure(format!("Cat {} not found", id)));
        }
        Ok(format!("Cat {} deleted", id))
    }
}

/// Serve `router` on an ephemeral loopback port and return its base URL
#[cfg(test)]
pub async fn spawn_fake_service(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
