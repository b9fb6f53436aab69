use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub message: String,
    #[serde(rename = "backupData")]
    pub backup_data: String,
}

#[derive(Debug, Deserialize)]
pub struct RestoreRequest {
    #[serde(rename = "backupData")]
    pub backup_data: Option<String>,
}

/// Parsed shape of a restore document. Every field is optional; whatever is
/// missing binds as NULL and is left to the store's constraints.
#[derive(Debug, Deserialize)]
pub struct RestoreDocument {
    #[serde(default)]
    pub settings: Option<RestoreSettings>,
    #[serde(default)]
    pub records: Option<Vec<RestoreRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct RestoreSettings {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub initial_weight: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub target_months: Option<i64>,
    #[serde(default)]
    pub reminder_enabled: Option<Value>,
    #[serde(default)]
    pub reminder_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestoreRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub feeling: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
