use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{require_session, SessionQuery};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RoadmapRequest {
    pub role: String,
}

#[derive(Serialize)]
pub struct RoadmapResponse {
    pub role: String,
    pub roadmap: String,
}

/// POST /api/v1/roadmap
///
/// Proxies one advisor call; same single-attempt, generic-failure policy as
/// the quiz fetch.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let role = req.role.trim();
    if role.is_empty() {
        return Err(AppError::Validation("role must not be empty".into()));
    }

    let roadmap = state.advisor.generate_roadmap(role).await?;
    Ok(Json(RoadmapResponse {
        role: role.to_string(),
        roadmap,
    }))
}
