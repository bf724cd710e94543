use std::collections::HashMap;
use std::sync::MutexGuard;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{require_session, SessionQuery};
use crate::catalog::Track;
use crate::errors::AppError;
use crate::models::profile::QuizResult;
use crate::quiz::session::{QuizError, QuizQuestion, QuizReport, QuizSession};
use crate::routes;
use crate::state::AppState;

impl From<QuizError> for AppError {
    fn from(e: QuizError) -> Self {
        match e {
            QuizError::Empty | QuizError::CorruptQuestion { .. } => {
                AppError::AdvisorData(e.to_string())
            }
            QuizError::UnknownQuestion(_) => AppError::NotFound(e.to_string()),
            QuizError::UnknownOption { .. } | QuizError::Incomplete { .. } => {
                AppError::Validation(e.to_string())
            }
            QuizError::AlreadySubmitted => AppError::Conflict(e.to_string()),
        }
    }
}

fn lock_sessions(
    state: &AppState,
) -> Result<MutexGuard<'_, HashMap<Uuid, QuizSession>>, AppError> {
    state
        .quiz_sessions
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("quiz session lock poisoned")))
}

fn no_active_quiz() -> AppError {
    AppError::MissingPrerequisite {
        missing: "No active quiz".into(),
        redirect_to: routes::QUIZ,
    }
}

#[derive(Serialize)]
pub struct QuizStartResponse {
    pub track: Track,
    pub questions: Vec<QuizQuestion>,
    pub total: usize,
}

/// Gate plus fetch for a new quiz visit. Without a persisted track the
/// upstream request is never issued; with one, a single attempt is made (no
/// retry) and any failure surfaces as a generic advisor error.
async fn fetch_quiz_session(
    advisor: &dyn crate::advisor_client::AdvisorApi,
    track: Option<Track>,
) -> Result<QuizSession, AppError> {
    let track = track.ok_or(AppError::MissingPrerequisite {
        missing: "No track selected".into(),
        redirect_to: routes::TRACK_SELECTION,
    })?;
    let payload = advisor.generate_quiz(track.as_str()).await?;
    Ok(QuizSession::from_payload(track, payload)?)
}

/// POST /api/v1/quiz/start
///
/// A restart replaces any previous visit and clears its answers.
pub async fn handle_quiz_start(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<QuizStartResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let track = state.store.selected_track(q.session_id).await?;
    let session = fetch_quiz_session(state.advisor.as_ref(), track).await?;

    let response = QuizStartResponse {
        track: session.track(),
        questions: session.questions().to_vec(),
        total: session.total(),
    };
    lock_sessions(&state)?.insert(q.session_id, session);
    Ok(Json(response))
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub question_id: u32,
    pub selected: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answered: usize,
    pub total: usize,
    /// The submit action stays disabled until every question is answered.
    pub ready_to_submit: bool,
}

/// POST /api/v1/quiz/answer
pub async fn handle_quiz_answer(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let mut sessions = lock_sessions(&state)?;
    let session = sessions.get_mut(&q.session_id).ok_or_else(no_active_quiz)?;
    session.record_answer(req.question_id, req.selected)?;
    Ok(Json(AnswerResponse {
        answered: session.answered(),
        total: session.total(),
        ready_to_submit: session.all_answered(),
    }))
}

#[derive(Serialize)]
pub struct QuizSubmitResponse {
    #[serde(flatten)]
    pub report: QuizReport,
    /// Hand-off to the completion step regardless of score.
    pub next: &'static str,
}

/// POST /api/v1/quiz/submit
pub async fn handle_quiz_submit(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<QuizSubmitResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let (report, track) = {
        let mut sessions = lock_sessions(&state)?;
        let session = sessions.get_mut(&q.session_id).ok_or_else(no_active_quiz)?;
        let report = session.submit()?;
        (report, session.track())
    };

    let result = QuizResult {
        track,
        correct: report.correct,
        total: report.total,
        completed_at: Utc::now(),
    };
    state.store.put_quiz_result(q.session_id, &result).await?;

    Ok(Json(QuizSubmitResponse {
        report,
        next: routes::COMPLETION,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPhase {
    Idle,
    Ready,
    Submitted,
}

#[derive(Serialize)]
pub struct QuizStateResponse {
    pub phase: VisitPhase,
    pub questions: Vec<QuizQuestion>,
    pub answered: usize,
    pub total: usize,
}

/// GET /api/v1/quiz
pub async fn handle_quiz_state(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<QuizStateResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let sessions = lock_sessions(&state)?;
    let response = match sessions.get(&q.session_id) {
        None => QuizStateResponse {
            phase: VisitPhase::Idle,
            questions: Vec::new(),
            answered: 0,
            total: 0,
        },
        Some(session) => QuizStateResponse {
            phase: match session.phase() {
                crate::quiz::session::QuizPhase::Ready => VisitPhase::Ready,
                crate::quiz::session::QuizPhase::Submitted => VisitPhase::Submitted,
            },
            questions: session.questions().to_vec(),
            answered: session.answered(),
            total: session.total(),
        },
    };
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::advisor_client::{AdvisorApi, AdvisorError, QuizQuestionPayload};

    /// Scripted advisor: serves a canned quiz and counts calls so tests can
    /// assert the upstream request was (or was not) issued.
    struct ScriptedAdvisor {
        questions: Vec<QuizQuestionPayload>,
        quiz_calls: AtomicUsize,
    }

    impl ScriptedAdvisor {
        fn new(questions: Vec<QuizQuestionPayload>) -> Self {
            Self {
                questions,
                quiz_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AdvisorApi for ScriptedAdvisor {
        async fn generate_quiz(
            &self,
            _domain: &str,
        ) -> Result<Vec<QuizQuestionPayload>, AdvisorError> {
            self.quiz_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.questions.clone())
        }

        async fn generate_roadmap(&self, _role: &str) -> Result<String, AdvisorError> {
            Ok(String::new())
        }
    }

    fn one_question() -> Vec<QuizQuestionPayload> {
        vec![QuizQuestionPayload {
            question: "Q1".into(),
            options: vec!["A".into(), "B".into()],
            correct_answer: "A".into(),
        }]
    }

    #[tokio::test]
    async fn test_missing_track_never_issues_the_upstream_request() {
        let advisor = ScriptedAdvisor::new(one_question());

        let err = fetch_quiz_session(&advisor, None).await.unwrap_err();
        match err {
            AppError::MissingPrerequisite {
                missing,
                redirect_to,
            } => {
                assert_eq!(missing, "No track selected");
                assert_eq!(redirect_to, routes::TRACK_SELECTION);
            }
            other => panic!("expected missing-prerequisite error, got {other}"),
        }
        assert_eq!(advisor.quiz_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_persisted_track_issues_exactly_one_request() {
        let advisor = ScriptedAdvisor::new(one_question());

        let session = fetch_quiz_session(&advisor, Some(Track::Sde))
            .await
            .unwrap();
        assert_eq!(session.track(), Track::Sde);
        assert_eq!(session.total(), 1);
        assert_eq!(advisor.quiz_calls.load(Ordering::SeqCst), 1);
    }
}
