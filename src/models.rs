use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Only key names are exposed, never values.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub name: String,
    pub keys: Vec<String>,
}
