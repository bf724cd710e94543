use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::draft::{AssessmentDraft, AssessmentError, SkillSplit};
use crate::auth::{require_session, SessionQuery};
use crate::catalog::{assessment_skills, Track};
use crate::errors::AppError;
use crate::routes;
use crate::state::AppState;

impl From<AssessmentError> for AppError {
    fn from(e: AssessmentError) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[derive(Serialize)]
pub struct AssessmentView {
    pub track: Track,
    pub title: &'static str,
    pub skills: &'static [&'static str],
    pub known: Vec<String>,
    pub known_count: usize,
    pub total: usize,
    /// Display-only: `known / total × 100`, rounded.
    pub coverage_percent: u32,
}

impl AssessmentView {
    fn from_draft(draft: &AssessmentDraft) -> Self {
        Self {
            track: draft.track(),
            title: draft.track().title(),
            skills: assessment_skills(draft.track()),
            known: draft.known_in_order(),
            known_count: draft.known_count(),
            total: draft.total(),
            coverage_percent: draft.coverage_percent(),
        }
    }
}

/// Loads the current draft for the persisted track. Fails closed with a
/// redirect to track selection when no (or an unrecognized) track is stored.
async fn load_draft(state: &AppState, session_id: Uuid) -> Result<AssessmentDraft, AppError> {
    let track = state
        .store
        .selected_track(session_id)
        .await?
        .ok_or(AppError::MissingPrerequisite {
            missing: "No track selected".into(),
            redirect_to: routes::TRACK_SELECTION,
        })?;
    let known = state.store.assessment_draft(session_id).await?;
    Ok(AssessmentDraft::with_known(track, known))
}

/// GET /api/v1/assessment
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<AssessmentView>, AppError> {
    require_session(&state.store, q.session_id).await?;
    let draft = load_draft(&state, q.session_id).await?;
    Ok(Json(AssessmentView::from_draft(&draft)))
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub skill: String,
}

/// POST /api/v1/assessment/toggle
pub async fn handle_toggle_skill(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<AssessmentView>, AppError> {
    require_session(&state.store, q.session_id).await?;
    let mut draft = load_draft(&state, q.session_id).await?;
    draft.toggle(&req.skill)?;
    state
        .store
        .put_assessment_draft(q.session_id, &draft.known_in_order())
        .await?;
    Ok(Json(AssessmentView::from_draft(&draft)))
}

#[derive(Serialize)]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub split: SkillSplit,
    pub next: &'static str,
}

/// POST /api/v1/assessment/submit
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<SubmitResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;
    let draft = load_draft(&state, q.session_id).await?;
    let split = draft.submit()?;
    state
        .store
        .put_skill_split(q.session_id, &split.known, &split.unknown)
        .await?;
    Ok(Json(SubmitResponse {
        split,
        next: routes::NEXT_STEPS,
    }))
}
