use serde::{Deserialize, Serialize};

/// Error body returned by the shelter service on a rejected request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, returning the server's message if one is present
    pub fn message_from(body: &str) -> Option<String> {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
        parsed
            .error
            .or(parsed.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Status message returned by the shelter service (e.g. on delete)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}
