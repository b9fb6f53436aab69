use anyhow::Context;

mod app;
mod auth;
mod backup;
mod config;
mod error;
mod health;
mod records;
mod settings;
mod state;
mod stats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "weighttrack=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    sqlx::migrate!("./migrations")
        .run(&app_state.db)
        .await
        .context("run database migrations")?;

    tracing::info!(
        database = %app_state.config.database_path,
        registration = app_state.config.allow_registration,
        "store ready"
    );

    let db = app_state.db.clone();
    let app = app::build_app(app_state);
    app::serve(app, db).await
}
