use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::animals::dtos::{CreatedAnimal, DraftRecord};
use crate::features::animals::models::{AnimalId, AnimalRecord};
use crate::shared::constants::{
    ADD_FAILED_MESSAGE, DELETE_FAILED_MESSAGE, FETCH_FAILED_MESSAGE, PICTURES_FIELD,
};
use crate::shared::types::{ApiErrorBody, ApiMessage};

/// The remote shelter service, as seen by the client
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Fetch the whole record collection
    async fn fetch_all(&self) -> Result<Vec<AnimalRecord>>;

    /// Submit a draft with its attachments as one multipart request
    async fn create(&self, draft: &DraftRecord) -> Result<CreatedAnimal>;

    /// Delete one record, returning the service's status message
    async fn delete(&self, id: &AnimalId) -> Result<String>;
}

/// reqwest-backed client for the shelter HTTP API
pub struct ShelterApiClient {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl ShelterApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn add_url(&self) -> String {
        format!("{}/add", self.config.collection_url())
    }

    fn delete_url(&self, id: &AnimalId) -> String {
        format!(
            "{}/{}/delete",
            self.config.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }

    fn build_form(draft: &DraftRecord) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in draft.scalar_fields() {
            form = form.text(name, value);
        }

        for attachment in &draft.attachments {
            let mut part =
                Part::bytes(attachment.data.clone()).file_name(attachment.file_name.clone());
            if let Some(ref content_type) = attachment.content_type {
                part = part.mime_str(content_type).map_err(|e| {
                    AppError::Validation(format!(
                        "Invalid content type for {}: {}",
                        attachment.file_name, e
                    ))
                })?;
            }
            form = form.part(PICTURES_FIELD, part);
        }

        Ok(form)
    }
}

#[async_trait]
impl RecordApi for ShelterApiClient {
    async fn fetch_all(&self) -> Result<Vec<AnimalRecord>> {
        let url = self.config.collection_url();

        tracing::debug!("Fetching records from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Error fetching cats: {}", e);
            AppError::LoadFailure(format!("{}: {}", FETCH_FAILED_MESSAGE, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Shelter API error: HTTP {} - {}", status, body);
            return Err(AppError::LoadFailure(format!(
                "{}: HTTP {}",
                FETCH_FAILED_MESSAGE, status
            )));
        }

        response.json::<Vec<AnimalRecord>>().await.map_err(|e| {
            tracing::error!("Failed to parse records response: {}", e);
            AppError::LoadFailure(format!("{}: {}", FETCH_FAILED_MESSAGE, e))
        })
    }

    async fn create(&self, draft: &DraftRecord) -> Result<CreatedAnimal> {
        let url = self.add_url();
        let form = Self::build_form(draft)?;

        tracing::debug!(
            "Submitting new record '{}' with {} picture(s) to {}",
            draft.name,
            draft.attachments.len(),
            url
        );

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error adding cat: {}", e);
                AppError::MutationFailure(ADD_FAILED_MESSAGE.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::error!("Shelter API rejected create: HTTP {} - {}", status, body);
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| ADD_FAILED_MESSAGE.to_string());
            return Err(AppError::MutationFailure(message));
        }

        // A success with an unreadable body still means the record exists
        let created = serde_json::from_str::<CreatedAnimal>(&body).unwrap_or_else(|e| {
            tracing::warn!("Could not parse create response: {}", e);
            CreatedAnimal::default()
        });

        Ok(created)
    }

    async fn delete(&self, id: &AnimalId) -> Result<String> {
        let url = self.delete_url(id);

        tracing::debug!("Deleting record {} via {}", id, url);

        let response = self.http_client.delete(&url).send().await.map_err(|e| {
            tracing::error!("Error deleting cat: {}", e);
            AppError::MutationFailure(DELETE_FAILED_MESSAGE.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::error!("Shelter API rejected delete: HTTP {} - {}", status, body);
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_string());
            return Err(AppError::MutationFailure(message));
        }

        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_default();

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::animals::dtos::Attachment;
    use crate::shared::test_helpers::spawn_fake_service;
    use axum::extract::{Multipart, Path, State};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Multipart parts seen by the fake service: (field name, file name)
    type SeenParts = Arc<Mutex<Vec<(String, Option<String>)>>>;

    async fn client_for(router: Router) -> ShelterApiClient {
        let base_url = spawn_fake_service(router).await;
        ShelterApiClient::new(ApiConfig::new(&base_url, "cats", "static/uploads").unwrap())
    }

    fn valid_draft() -> DraftRecord {
        let mut draft = DraftRecord {
            name: "Mochi".to_string(),
            age_days: "120".to_string(),
            gender: "Female".to_string(),
            sterilized: "No".to_string(),
            primary_breed: "Tabby".to_string(),
            primary_color: "Orange".to_string(),
            intake_type: "Stray".to_string(),
            intake_condition: "Normal".to_string(),
            ..DraftRecord::default()
        };
        draft.attach(Attachment::new("one.jpg", vec![1, 2]));
        draft.attach(Attachment::new("two.png", vec![3, 4]));
        draft
    }

    #[tokio::test]
    async fn test_fetch_all_parses_collection() {
        let router = Router::new().route(
            "/api/cats",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "A", "age_days": 10, "status": "Available"},
                    {"id": 2, "name": "B", "age_days": "900", "status": "Adopted"}
                ]))
            }),
        );
        let client = client_for(router).await;

        let records = client.fetch_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].age_days, Some(900));
    }

    #[tokio::test]
    async fn test_fetch_all_non_success_is_load_failure() {
        let router = Router::new().route(
            "/api/cats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = client_for(router).await;

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::LoadFailure(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable_is_load_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base_url = format!("http://{}", addr);
        let client = ShelterApiClient::new(ApiConfig::new(&base_url, "cats", "").unwrap());
        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::LoadFailure(_)));
    }

    #[tokio::test]
    async fn test_create_sends_fields_and_repeated_pictures() {
        let seen: SeenParts = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route(
                "/api/cats/add",
                post(
                    |State(seen): State<SeenParts>, mut multipart: Multipart| async move {
                        while let Some(field) = multipart.next_field().await.unwrap() {
                            let name = field.name().unwrap_or_default().to_string();
                            let file_name = field.file_name().map(String::from);
                            seen.lock().unwrap().push((name, file_name));
                        }
                        Json(json!({"message": "Cat added", "adoption_chance": 81.0}))
                    },
                ),
            )
            .with_state(Arc::clone(&seen));
        let client = client_for(router).await;

        let created = client.create(&valid_draft()).await.unwrap();
        assert_eq!(created.adoption_chance, Some(81.0));

        let seen = seen.lock().unwrap();
        let text_fields: Vec<_> = seen
            .iter()
            .filter(|(_, file)| file.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(text_fields, crate::features::animals::dtos::DRAFT_FIELDS);

        let pictures: Vec<_> = seen
            .iter()
            .filter(|(name, _)| name == PICTURES_FIELD)
            .filter_map(|(_, file)| file.clone())
            .collect();
        assert_eq!(pictures, vec!["one.jpg", "two.png"]);
    }

    #[tokio::test]
    async fn test_create_surfaces_server_error_message() {
        let router = Router::new().route(
            "/api/cats/add",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid image format"})),
                )
            }),
        );
        let client = client_for(router).await;

        match client.create(&valid_draft()).await {
            Err(AppError::MutationFailure(msg)) => assert_eq!(msg, "Invalid image format"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_falls_back_to_generic_message() {
        let router = Router::new().route(
            "/api/cats/add",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let client = client_for(router).await;

        match client.create(&valid_draft()).await {
            Err(AppError::MutationFailure(msg)) => assert_eq!(msg, ADD_FAILED_MESSAGE),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_hits_record_path() {
        let router = Router::new().route(
            "/api/cats/{id}/delete",
            delete(|Path(id): Path<String>| async move {
                Json(json!({"message": format!("Cat {} deleted", id)}))
            }),
        );
        let client = client_for(router).await;

        let message = client.delete(&AnimalId::new("42")).await.unwrap();
        assert_eq!(message, "Cat 42 deleted");
    }

    #[tokio::test]
    async fn test_delete_non_success_is_mutation_failure() {
        let router = Router::new().route(
            "/api/cats/{id}/delete",
            delete(|| async { (StatusCode::NOT_FOUND, Json(Value::Null)) }),
        );
        let client = client_for(router).await;

        match client.delete(&AnimalId::new("42")).await {
            Err(AppError::MutationFailure(msg)) => assert_eq!(msg, DELETE_FAILED_MESSAGE),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
