use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-assigned record identifier.
///
/// The service may send it as a number or a string; either way it is kept as
/// opaque text and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawAnimalId")]
pub struct AnimalId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnimalId {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<RawAnimalId> for AnimalId {
    fn from(raw: RawAnimalId) -> Self {
        match raw {
            RawAnimalId::Int(n) => AnimalId(n.to_string()),
            RawAnimalId::UInt(n) => AnimalId(n.to_string()),
            // Whole floats print without a fraction: 1.0 -> "1"
            RawAnimalId::Float(f) => AnimalId(f.to_string()),
            RawAnimalId::Text(s) => AnimalId(s),
        }
    }
}

impl AnimalId {
    pub fn new(id: impl Into<String>) -> Self {
        AnimalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Adoption status. Only these two values are valid in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdoptionStatus {
    Available,
    Adopted,
}

impl AdoptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Available => "Available",
            AdoptionStatus::Adopted => "Adopted",
        }
    }
}

impl std::fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdoptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(AdoptionStatus::Available),
            "Adopted" => Ok(AdoptionStatus::Adopted),
            other => Err(format!("Unknown adoption status: {}", other)),
        }
    }
}

/// Gender as recorded by the shelter.
///
/// Values outside the three form options are kept verbatim in `Other` so
/// that statistics count them under their literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum Gender {
    Male,
    Female,
    Unknown,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
            Gender::Other(raw) => raw,
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Other(String::new())
    }
}

impl From<Option<String>> for Gender {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("Male") => Gender::Male,
            Some("Female") => Gender::Female,
            Some("Unknown") => Gender::Unknown,
            _ => Gender::Other(raw.unwrap_or_default()),
        }
    }
}

impl From<Value> for Gender {
    fn from(raw: Value) -> Self {
        Self::from(Some(literal_text(&raw)))
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sterilization status, with the same literal-preserving fallback as [`Gender`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum Sterilized {
    Yes,
    No,
    Unknown,
    Other(String),
}

impl Sterilized {
    pub fn as_str(&self) -> &str {
        match self {
            Sterilized::Yes => "Yes",
            Sterilized::No => "No",
            Sterilized::Unknown => "Unknown",
            Sterilized::Other(raw) => raw,
        }
    }
}

impl Default for Sterilized {
    fn default() -> Self {
        Sterilized::Other(String::new())
    }
}

impl From<Option<String>> for Sterilized {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("Yes") => Sterilized::Yes,
            Some("No") => Sterilized::No,
            Some("Unknown") => Sterilized::Unknown,
            _ => Sterilized::Other(raw.unwrap_or_default()),
        }
    }
}

impl From<Value> for Sterilized {
    fn from(raw: Value) -> Self {
        Self::from(Some(literal_text(&raw)))
    }
}

impl From<Sterilized> for String {
    fn from(sterilized: Sterilized) -> Self {
        sterilized.as_str().to_string()
    }
}

impl std::fmt::Display for Sterilized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shelter animal as served by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: AnimalId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    /// Age in days. `None` when the service sent something that is not a
    /// non-negative whole number.
    #[serde(default, deserialize_with = "deserialize_age_days")]
    pub age_days: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub sterilized: Sterilized,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub primary_breed: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub primary_color: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub intake_type: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub intake_condition: String,
    pub status: AdoptionStatus,
    /// Server-computed percentage, 0-100
    #[serde(default, deserialize_with = "deserialize_adoption_chance")]
    pub adoption_chance: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

impl AnimalRecord {
    pub fn is_available(&self) -> bool {
        self.status == AdoptionStatus::Available
    }
}

/// Interpret a JSON value as an age in days
pub fn parse_age_days(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok();
            }
            // Whole floats such as 400.0 are accepted; negatives and fractions are not
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u32)
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Text of a JSON value as the service would print it: strings as-is, `null`
/// as "null", anything else as its JSON form
pub fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(literal_text(&Value::deserialize(deserializer)?))
}

fn deserialize_age_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_age_days))
}

fn deserialize_adoption_chance<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite())
        .map(|f| f.round().clamp(0.0, 100.0) as u8))
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
