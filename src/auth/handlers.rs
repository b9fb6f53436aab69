use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::auth::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::settings::repo::UserSettings;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if !state.config.allow_registration {
        warn!("registration attempt while disabled");
        return Err(ApiError::Forbidden("registration is disabled".into()));
    }

    let username = required(payload.username)
        .ok_or_else(|| ApiError::Validation("username and password are required".into()))?;
    let password = required(payload.password)
        .ok_or_else(|| ApiError::Validation("username and password are required".into()))?;
    let email = required(payload.email);

    if let Some(email) = email.as_deref() {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
    }

    if User::find_by_username(&state.db, &username).await?.is_some() {
        warn!(%username, "username already taken");
        return Err(ApiError::Conflict("username already taken".into()));
    }

    let hash = hash_password(&password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal("failed to hash password".into())
    })?;

    let user_id = Uuid::new_v4().to_string();
    User::create(&state.db, &user_id, &username, &hash, email.as_deref()).await?;
    UserSettings::insert_defaults(&state.db, &Uuid::new_v4().to_string(), &user_id).await?;

    info!(%user_id, %username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user registered".into(),
            user_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = required(payload.username)
        .ok_or_else(|| ApiError::Validation("username and password are required".into()))?;
    let password = required(payload.password)
        .ok_or_else(|| ApiError::Validation("username and password are required".into()))?;

    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| {
            warn!(%username, "login with unknown username");
            ApiError::Unauthorized("invalid username or password".into())
        })?;

    let ok = verify_password(&password, &user.password).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Internal("failed to verify password".into())
    })?;
    if !ok {
        warn!(%username, user_id = %user.id, "login with invalid password");
        return Err(ApiError::Unauthorized("invalid username or password".into()));
    }

    info!(user_id = %user.id, %username, "user logged in");
    Ok(Json(LoginResponse {
        message: "login successful".into(),
        token: user.id,
        username: user.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_payload(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.into()),
            password: Some("hunter2hunter2".into()),
            email: None,
        }
    }

    #[tokio::test]
    async fn register_is_rejected_when_disabled() {
        let mut state = AppState::test().await;
        let mut config = (*state.config).clone();
        config.allow_registration = false;
        state.config = std::sync::Arc::new(config);

        let payload = register_payload("alice");
        let err = register(State(state), Json(payload)).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn register_requires_username_and_password() {
        let state = AppState::test().await;
        let err = register(
            State(state),
            Json(RegisterRequest {
                username: Some("alice".into()),
                password: None,
                email: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let state = AppState::test().await;
        let payload = register_payload("bob");
        register(State(state.clone()), Json(payload))
            .await
            .expect("first registration");

        let payload = register_payload("bob");
        let err = register(State(state), Json(payload)).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_creates_default_settings() {
        let state = AppState::test().await;
        let payload = register_payload("carol");
        let (status, Json(body)) = register(State(state.clone()), Json(payload))
            .await
            .expect("registration");
        assert_eq!(status, StatusCode::CREATED);

        let settings = UserSettings::find_by_user(&state.db, &body.user_id)
            .await
            .expect("query settings")
            .expect("settings row");
        assert_eq!(settings.height, 170.0);
        assert_eq!(settings.reminder_time, "20:00");
    }

    #[tokio::test]
    async fn login_roundtrip_returns_user_id_token() {
        let state = AppState::test().await;
        let payload = register_payload("dave");
        let (_, Json(registered)) = register(State(state.clone()), Json(payload))
            .await
            .expect("registration");

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: Some("dave".into()),
                password: Some("hunter2hunter2".into()),
            }),
        )
        .await
        .expect("login");
        assert_eq!(response.token, registered.user_id);
        assert_eq!(response.username, "dave");

        let err = login(
            State(state),
            Json(LoginRequest {
                username: Some("dave".into()),
                password: Some("wrong-password".into()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
