//! Read-side summaries: the completion screen and the progress dashboard.
//! No computation beyond presence checks, counting, and percentage division.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::auth::{require_session, SessionQuery};
use crate::catalog::Track;
use crate::errors::AppError;
use crate::models::profile::QuizResult;
use crate::routes;
use crate::state::AppState;

/// Fixed accomplishment checklist shown on the completion step.
const ACHIEVEMENTS: [&str; 4] = [
    "Completed skill assessment",
    "Identified learning opportunities",
    "Received personalized recommendations",
    "Connected with mentorship resources",
];

#[derive(Serialize)]
pub struct CompletionResponse {
    pub greeting: String,
    pub achievements: [&'static str; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_result: Option<QuizResult>,
}

/// GET /api/v1/summary/completion
///
/// Pure read side: absent details degrade to the impersonal greeting rather
/// than an error.
pub async fn handle_completion(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<CompletionResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let details = state.store.user_details(q.session_id).await?;
    let greeting = match details {
        Some(d) => format!("Congratulations, {}!", d.first_name),
        None => "Congratulations!".to_string(),
    };
    let quiz_result = state.store.quiz_result(q.session_id).await?;

    Ok(Json(CompletionResponse {
        greeting,
        achievements: ACHIEVEMENTS,
        quiz_result,
    }))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_title: Option<&'static str>,
    pub known_skills: Vec<String>,
    pub unknown_skills: Vec<String>,
    pub mastered: usize,
    pub total: usize,
    /// `known / (known + unknown) × 100`, rounded; 0 before any assessment.
    pub overall_percent: u32,
}

fn overall_percent(mastered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (mastered as f64 / total as f64 * 100.0).round() as u32
}

/// GET /api/v1/summary/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let details = state.store.user_details(q.session_id).await?.ok_or(
        AppError::MissingPrerequisite {
            missing: "Complete your profile to see the dashboard".into(),
            redirect_to: routes::PERSONAL_DETAILS,
        },
    )?;

    let track = state.store.selected_track(q.session_id).await?;
    let known_skills = state.store.known_skills(q.session_id).await?;
    let unknown_skills = state.store.unknown_skills(q.session_id).await?;

    let mastered = known_skills.len();
    let total = known_skills.len() + unknown_skills.len();

    Ok(Json(DashboardResponse {
        first_name: details.first_name,
        track,
        track_title: track.map(Track::title),
        known_skills,
        unknown_skills,
        mastered,
        total,
        overall_percent: overall_percent(mastered, total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_percent_rounds() {
        assert_eq!(overall_percent(0, 0), 0);
        assert_eq!(overall_percent(1, 12), 8);
        assert_eq!(overall_percent(2, 12), 17);
        assert_eq!(overall_percent(12, 12), 100);
    }

    #[test]
    fn test_achievement_checklist_is_fixed() {
        assert_eq!(ACHIEVEMENTS.len(), 4);
        assert_eq!(ACHIEVEMENTS[0], "Completed skill assessment");
    }
}
