use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::PgPool;
use uuid::Uuid;

use crate::advisor_client::AdvisorApi;
use crate::config::Config;
use crate::courses::board::CourseBoard;
use crate::profile::store::ProfileStore;
use crate::quiz::session::QuizSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis-backed persisted profile store: the single durable owner of
    /// cross-step state (details, track, skill split, quiz results).
    pub store: ProfileStore,
    /// Pluggable upstream advisor (quiz + roadmap generation). Behind a trait
    /// so flow logic is testable without a network.
    pub advisor: Arc<dyn AdvisorApi>,
    pub config: Config,
    /// Quiz sessions are memory-only by design: questions are fetched fresh
    /// per visit and discarded on restart. Keyed by session id.
    pub quiz_sessions: Arc<Mutex<HashMap<Uuid, QuizSession>>>,
    /// Course completion flags are memory-only and reset on track switch.
    pub course_boards: Arc<Mutex<HashMap<Uuid, CourseBoard>>>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        store: ProfileStore,
        advisor: Arc<dyn AdvisorApi>,
        config: Config,
    ) -> Self {
        Self {
            db,
            store,
            advisor,
            config,
            quiz_sessions: Arc::new(Mutex::new(HashMap::new())),
            course_boards: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
