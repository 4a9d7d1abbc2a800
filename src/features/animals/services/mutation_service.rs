use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::animals::clients::RecordApi;
use crate::features::animals::dtos::{CreatedAnimal, DeleteOutcome, DraftRecord};
use crate::features::animals::models::AnimalId;
use crate::features::animals::services::RecordStore;
use crate::shared::constants::DELETE_CONFIRMATION_PROMPT;

/// Blocking yes/no question put to the operator
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Sends create/delete requests and reloads the store once the service has
/// confirmed them. Nothing is changed locally ahead of that confirmation.
pub struct MutationService {
    api: Arc<dyn RecordApi>,
    store: Arc<RecordStore>,
    confirm: Arc<dyn Confirm>,
}

impl MutationService {
    pub fn new(api: Arc<dyn RecordApi>, store: Arc<RecordStore>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            store,
            confirm,
        }
    }

    /// Submit the draft as a new record.
    ///
    /// On success the store is reloaded and the draft reset to its defaults.
    /// On any failure the draft and the store are left exactly as they were.
    pub async fn submit_create(&self, draft: &mut DraftRecord) -> Result<CreatedAnimal> {
        draft
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if draft.attachments.is_empty() {
            return Err(AppError::Validation(
                "At least one picture is required".to_string(),
            ));
        }

        let created = self.api.create(draft).await.map_err(|e| {
            tracing::error!("Error adding cat: {}", e);
            e
        })?;

        tracing::info!(
            "Cat '{}' added (adoption chance: {:?})",
            draft.name,
            created.adoption_chance
        );

        self.reload_after("create").await;
        draft.reset();

        Ok(created)
    }

    /// Delete a record after the operator confirms.
    ///
    /// Declining sends nothing. A rejected delete leaves the record visible.
    pub async fn submit_delete(&self, id: &AnimalId) -> Result<DeleteOutcome> {
        if !self.confirm.confirm(DELETE_CONFIRMATION_PROMPT).await {
            tracing::debug!("Delete of {} cancelled by operator", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        let message = self.api.delete(id).await.map_err(|e| {
            tracing::error!("Error deleting cat {}: {}", id, e);
            e
        })?;

        tracing::info!("Cat {} deleted: {}", id, message);

        self.reload_after("delete").await;

        Ok(DeleteOutcome::Deleted { message })
    }

    /// The mutation already succeeded; a failed reload is reported through
    /// the store's events, not as a mutation failure.
    async fn reload_after(&self, mutation: &str) {
        if let Err(e) = self.store.load().await {
            tracing::warn!("Reload after {} failed: {}", mutation, e);
        }
    }
}
