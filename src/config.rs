use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: String,
    pub allow_registration: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/weight_tracker.db".into());
        // Registration ships disabled; flip ALLOW_REGISTRATION to open it up.
        let allow_registration = std::env::var("ALLOW_REGISTRATION")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            database_path,
            allow_registration,
        })
    }
}
