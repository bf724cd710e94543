#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account row. The password hash never leaves the auth module.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub user_id: Uuid,
    pub email: String,
}

impl From<&UserRow> for UserPublic {
    fn from(row: &UserRow) -> Self {
        Self {
            user_id: row.id,
            email: row.email.clone(),
        }
    }
}
