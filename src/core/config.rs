use std::env;
use std::str::FromStr;

use crate::shared::constants::{DEFAULT_ADMIN_ACCESS_CODE, DEFAULT_ADOPTION_CONTACT_EMAIL};

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub access: AccessConfig,
    pub store: StoreConfig,
}

/// Where the shelter service lives and how its paths are laid out
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub collection: String,
    pub uploads_path: String,
}

/// Settings for the user/admin view gate
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Code that unlocks the admin view. A UI convenience gate, not a credential.
    pub unlock_code: String,
    pub adoption_contact_email: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub reload_policy: ReloadPolicy,
    pub event_capacity: usize,
}

/// What the record store does with a load response that arrives after a
/// newer one has already been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Whichever response arrives last becomes the visible state
    #[default]
    LastArrivalWins,
    /// Responses older than the applied one are dropped
    DiscardStale,
}

impl FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-arrival-wins" | "last_arrival_wins" => Ok(ReloadPolicy::LastArrivalWins),
            "discard-stale" | "discard_stale" => Ok(ReloadPolicy::DiscardStale),
            other => Err(format!(
                "Invalid STORE_RELOAD_POLICY '{}': expected 'last-arrival-wins' or 'discard-stale'",
                other
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            access: AccessConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";
    const DEFAULT_COLLECTION: &'static str = "cats";
    const DEFAULT_UPLOADS_PATH: &'static str = "static/uploads";

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("SHELTER_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let collection = env::var("SHELTER_COLLECTION")
            .unwrap_or_else(|_| Self::DEFAULT_COLLECTION.to_string());
        let uploads_path = env::var("SHELTER_UPLOADS_PATH")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOADS_PATH.to_string());

        Self::new(&base_url, &collection, &uploads_path)
    }

    /// Build from raw values, normalizing slashes
    pub fn new(base_url: &str, collection: &str, uploads_path: &str) -> Result<Self, String> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(format!(
                "SHELTER_API_URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        let collection = collection.trim().trim_matches('/').to_string();
        if collection.is_empty() {
            return Err("SHELTER_COLLECTION must not be empty".to_string());
        }

        Ok(Self {
            base_url,
            collection,
            uploads_path: uploads_path.trim().trim_matches('/').to_string(),
        })
    }

    /// `GET` target for the whole collection
    pub fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.collection)
    }

    /// Static-asset URL of an uploaded picture
    pub fn image_url(&self, file_name: &str) -> String {
        if self.uploads_path.is_empty() {
            return format!("{}/{}", self.base_url, urlencoding::encode(file_name));
        }
        format!(
            "{}/{}/{}",
            self.base_url,
            self.uploads_path,
            urlencoding::encode(file_name)
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            uploads_path: Self::DEFAULT_UPLOADS_PATH.to_string(),
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Result<Self, String> {
        let unlock_code = env::var("ADMIN_ACCESS_CODE")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_ACCESS_CODE.to_string());
        let adoption_contact_email = env::var("ADOPTION_CONTACT_EMAIL")
            .unwrap_or_else(|_| DEFAULT_ADOPTION_CONTACT_EMAIL.to_string());

        Ok(Self {
            unlock_code,
            adoption_contact_email,
        })
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            unlock_code: DEFAULT_ADMIN_ACCESS_CODE.to_string(),
            adoption_contact_email: DEFAULT_ADOPTION_CONTACT_EMAIL.to_string(),
        }
    }
}

impl StoreConfig {
    const DEFAULT_EVENT_CAPACITY: usize = 64;

    pub fn from_env() -> Result<Self, String> {
        let reload_policy = match env::var("STORE_RELOAD_POLICY") {
            Ok(raw) => raw.parse::<ReloadPolicy>()?,
            Err(_) => ReloadPolicy::default(),
        };

        let event_capacity = env::var("STORE_EVENT_CAPACITY")
            .unwrap_or_else(|_| Self::DEFAULT_EVENT_CAPACITY.to_string())
            .parse::<usize>()
            .map_err(|_| "STORE_EVENT_CAPACITY must be a valid number".to_string())?;

        if event_capacity == 0 {
            return Err("STORE_EVENT_CAPACITY must be at least 1".to_string());
        }

        Ok(Self {
            reload_policy,
            event_capacity,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reload_policy: ReloadPolicy::default(),
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}
