use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::animals::models::AnimalId;
use crate::shared::constants::DEFAULT_DRAFT_STATUS;

/// Form field names, in the order the add form presents them
pub const DRAFT_FIELDS: &[&str] = &[
    "name",
    "age_days",
    "gender",
    "sterilized",
    "primary_breed",
    "primary_color",
    "intake_type",
    "intake_condition",
    "status",
];

/// A file selected for upload with a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_from_file_name(&file_name).map(String::from);
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::Validation(format!("Not a file: {}", path.display())))?
            .to_string();

        let data = tokio::fs::read(path).await?;
        tracing::debug!("Read attachment {} ({} bytes)", file_name, data.len());

        Ok(Self::new(file_name, data))
    }
}

/// Guess a MIME type from a file extension
pub fn content_type_from_file_name(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// At least one picture must be selected. File contents stay out of the error.
fn validate_attachments(attachments: &[Attachment]) -> std::result::Result<(), ValidationError> {
    if attachments.is_empty() {
        return Err(ValidationError::new("attachments_required")
            .with_message(Cow::from("At least one picture is required")));
    }
    Ok(())
}

/// In-progress state of the admin add form.
///
/// Fields are kept exactly as typed. The default value is what a fresh form
/// shows: everything empty, status "Available", no attachments.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DraftRecord {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(regex(
        path = "*crate::shared::validation::AGE_DAYS_REGEX",
        message = "Age must be a whole number of days"
    ))]
    pub age_days: String,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[validate(length(min = 1, message = "Sterilized is required"))]
    pub sterilized: String,

    #[validate(length(min = 1, message = "Primary breed is required"))]
    pub primary_breed: String,

    #[validate(length(min = 1, message = "Primary color is required"))]
    pub primary_color: String,

    #[validate(length(min = 1, message = "Intake type is required"))]
    pub intake_type: String,

    #[validate(length(min = 1, message = "Intake condition is required"))]
    pub intake_condition: String,

    #[validate(regex(
        path = "*crate::shared::validation::STATUS_REGEX",
        message = "Status must be Available or Adopted"
    ))]
    pub status: String,

    #[validate(custom(function = "validate_attachments"))]
    pub attachments: Vec<Attachment>,
}

impl Default for DraftRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            age_days: String::new(),
            gender: String::new(),
            sterilized: String::new(),
            primary_breed: String::new(),
            primary_color: String::new(),
            intake_type: String::new(),
            intake_condition: String::new(),
            status: DEFAULT_DRAFT_STATUS.to_string(),
            attachments: Vec::new(),
        }
    }
}

impl DraftRecord {
    /// Set one form field by name
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let slot = match field {
            "name" => &mut self.name,
            "age_days" => &mut self.age_days,
            "gender" => &mut self.gender,
            "sterilized" => &mut self.sterilized,
            "primary_breed" => &mut self.primary_breed,
            "primary_color" => &mut self.primary_color,
            "intake_type" => &mut self.intake_type,
            "intake_condition" => &mut self.intake_condition,
            "status" => &mut self.status,
            other => {
                return Err(AppError::Validation(format!("Unknown form field: {}", other)));
            }
        };
        *slot = value.into();
        Ok(())
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Scalar fields as multipart text parts
    pub fn scalar_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("age_days", self.age_days.clone()),
            ("gender", self.gender.clone()),
            ("sterilized", self.sterilized.clone()),
            ("primary_breed", self.primary_breed.clone()),
            ("primary_color", self.primary_color.clone()),
            ("intake_type", self.intake_type.clone()),
            ("intake_condition", self.intake_condition.clone()),
            ("status", self.status.clone()),
        ]
    }

    /// Discard everything typed and selected
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Response to a successful create request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedAnimal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnimalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adoption_chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined the confirmation; nothing was sent
    Cancelled,
    /// The service confirmed the delete
    Deleted { message: String },
}
