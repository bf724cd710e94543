use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{require_session, SessionQuery};
use crate::catalog::Track;
use crate::errors::AppError;
use crate::models::profile::UserDetails;
use crate::routes;
use crate::state::AppState;

/// POST /api/v1/profile/details
pub async fn handle_put_details(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(details): Json<UserDetails>,
) -> Result<Json<DetailsResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    if let Err(field) = details.validate() {
        return Err(AppError::Validation(format!(
            "field '{field}' must not be empty"
        )));
    }

    state.store.put_user_details(q.session_id, &details).await?;
    Ok(Json(DetailsResponse {
        details: Some(details),
        next: Some(routes::TRACK_SELECTION),
    }))
}

/// GET /api/v1/profile/details
pub async fn handle_get_details(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<DetailsResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;
    let details = state.store.user_details(q.session_id).await?;
    Ok(Json(DetailsResponse {
        details,
        next: None,
    }))
}

#[derive(Serialize)]
pub struct DetailsResponse {
    pub details: Option<UserDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct TrackSelectRequest {
    pub track: String,
}

#[derive(Serialize)]
pub struct TrackSelectResponse {
    pub track: Track,
    pub title: &'static str,
    pub next: &'static str,
}

/// PUT /api/v1/profile/track
pub async fn handle_select_track(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(req): Json<TrackSelectRequest>,
) -> Result<Json<TrackSelectResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let track = Track::parse(&req.track)
        .ok_or_else(|| AppError::Validation(format!("unknown track '{}'", req.track)))?;

    state.store.put_selected_track(q.session_id, track).await?;
    Ok(Json(TrackSelectResponse {
        track,
        title: track.title(),
        next: routes::SKILL_ASSESSMENT,
    }))
}

#[derive(Serialize)]
pub struct TrackListing {
    pub id: Track,
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackListing>,
}

/// GET /api/v1/tracks
pub async fn handle_list_tracks() -> Json<TracksResponse> {
    let tracks = Track::ALL
        .into_iter()
        .map(|t| TrackListing {
            id: t,
            title: t.title(),
            description: t.description(),
            skills: t.headline_skills(),
        })
        .collect();
    Json(TracksResponse { tracks })
}
