use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Version {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub released: bool,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: Option<u64>,
}

/// Payload for `POST /version`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewVersion {
    pub name: String,
    pub description: String,
    pub archived: bool,
    pub released: bool,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "projectId")]
    pub project_id: u64,
}
