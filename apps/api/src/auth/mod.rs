//! Account registration, login, and session resolution.
//!
//! Passwords are hashed with argon2; a successful login mints a session id
//! that scopes every profile-store key for the rest of the flow.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{UserPublic, UserRow};
use crate::profile::store::ProfileStore;
use crate::state::AppState;

/// Session scoping for all flow endpoints, as `?session_id=<uuid>`.
#[derive(Deserialize)]
pub struct SessionQuery {
    pub session_id: Uuid,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
}

/// Rejects unknown sessions before any flow state is touched.
pub async fn require_session(store: &ProfileStore, session_id: Uuid) -> Result<Uuid, AppError> {
    store
        .session_user(session_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Validation("email must not be empty".into()));
    }
    if req.password.trim().is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?
        .to_string();

    let row: UserRow = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
         RETURNING id, email, password_hash, created_at",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            AppError::Conflict("An account with this email already exists".into())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!("Registered user {}", row.id);
    Ok((StatusCode::CREATED, Json(UserPublic::from(&row))))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&state.db)
    .await?;

    // Same rejection for unknown email and bad password.
    let row = row.ok_or(AppError::Unauthorized)?;
    let parsed_hash = PasswordHash::new(&row.password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored hash is unreadable: {e}")))?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let session_id = state.store.create_session(row.id).await?;
    tracing::info!("User {} logged in, session {session_id}", row.id);

    Ok(Json(LoginResponse {
        session_id,
        user_id: row.id,
        email: row.email,
    }))
}
