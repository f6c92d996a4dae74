use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable service. Prices are kept in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price_cents: i64,
    pub is_active: bool,
}

/// Body for both creating and replacing a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price_cents: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ServiceRequest {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Blank descriptions are stored as null.
    pub fn normalized_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
    }
}

fn default_active() -> bool {
    true
}
