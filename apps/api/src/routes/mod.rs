pub mod health;
pub mod support;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{assessment, auth, courses, profile, quiz, roadmap, summary};

// Flow step names used in `redirect_to` / `next` fields. These mirror the
// frontend's screen routes; the back/forward linkage between them is
// presentation routing and stays client-side.
pub const PERSONAL_DETAILS: &str = "/personal-details";
pub const TRACK_SELECTION: &str = "/track-selection";
pub const SKILL_ASSESSMENT: &str = "/skill-assessment";
pub const NEXT_STEPS: &str = "/next-steps";
pub const QUIZ: &str = "/quiz";
pub const COMPLETION: &str = "/completion";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Profile steps
        .route(
            "/api/v1/profile/details",
            post(profile::handlers::handle_put_details).get(profile::handlers::handle_get_details),
        )
        .route(
            "/api/v1/profile/track",
            put(profile::handlers::handle_select_track),
        )
        .route("/api/v1/tracks", get(profile::handlers::handle_list_tracks))
        // Skill assessment
        .route(
            "/api/v1/assessment",
            get(assessment::handlers::handle_get_assessment),
        )
        .route(
            "/api/v1/assessment/toggle",
            post(assessment::handlers::handle_toggle_skill),
        )
        .route(
            "/api/v1/assessment/submit",
            post(assessment::handlers::handle_submit_assessment),
        )
        // Quiz
        .route("/api/v1/quiz", get(quiz::handlers::handle_quiz_state))
        .route("/api/v1/quiz/start", post(quiz::handlers::handle_quiz_start))
        .route(
            "/api/v1/quiz/answer",
            post(quiz::handlers::handle_quiz_answer),
        )
        .route(
            "/api/v1/quiz/submit",
            post(quiz::handlers::handle_quiz_submit),
        )
        // Course recommendations
        .route(
            "/api/v1/courses",
            get(courses::handlers::handle_get_courses),
        )
        .route(
            "/api/v1/courses/track",
            put(courses::handlers::handle_switch_track),
        )
        .route(
            "/api/v1/courses/:id/complete",
            post(courses::handlers::handle_complete_course),
        )
        .route(
            "/api/v1/courses/finish",
            post(courses::handlers::handle_finish_courses),
        )
        // Summaries
        .route(
            "/api/v1/summary/completion",
            get(summary::handle_completion),
        )
        .route("/api/v1/summary/dashboard", get(summary::handle_dashboard))
        // Support & roadmap
        .route(
            "/api/v1/support/mentorship",
            get(support::mentorship_handler),
        )
        .route("/api/v1/roadmap", post(roadmap::handle_generate_roadmap))
        .with_state(state)
}
