use serde::Deserialize;

/// `PUT /settings` body. Fields are passed straight through to the store;
/// missing required columns surface as a store error, not field validation.
#[derive(Debug, Deserialize)]
pub struct SettingsPayload {
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub initial_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub target_months: Option<i64>,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<String>,
}
