use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct MentorshipResponse {
    /// Fixed external site; opened by the client in a new browsing context.
    /// No user data is sent.
    pub url: String,
    pub partner: &'static str,
}

/// GET /api/v1/support/mentorship
pub async fn mentorship_handler(State(state): State<AppState>) -> Json<MentorshipResponse> {
    Json(MentorshipResponse {
        url: state.config.mentorship_url.clone(),
        partner: "Schoolhouse.world",
    })
}
