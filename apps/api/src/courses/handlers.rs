use std::collections::HashMap;
use std::sync::MutexGuard;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{require_session, SessionQuery};
use crate::catalog::{Track, DEFAULT_TRACK};
use crate::courses::board::{CourseBoard, CourseStatus, UnknownCourse};
use crate::errors::AppError;
use crate::routes;
use crate::state::AppState;

impl From<UnknownCourse> for AppError {
    fn from(e: UnknownCourse) -> Self {
        AppError::NotFound(e.to_string())
    }
}

fn lock_boards(state: &AppState) -> Result<MutexGuard<'_, HashMap<Uuid, CourseBoard>>, AppError> {
    state
        .course_boards
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("course board lock poisoned")))
}

/// The track a fresh board starts on: the persisted selection, or the
/// default when none is set.
async fn fallback_track(state: &AppState, session_id: Uuid) -> Result<Track, AppError> {
    Ok(state
        .store
        .selected_track(session_id)
        .await?
        .unwrap_or(DEFAULT_TRACK))
}

/// Every course endpoint creates the session's board lazily; there is no
/// required ordering between listing, completing, and finishing.
fn board_entry<'a>(
    boards: &'a mut HashMap<Uuid, CourseBoard>,
    session_id: Uuid,
    fallback: Track,
) -> &'a mut CourseBoard {
    boards
        .entry(session_id)
        .or_insert_with(|| CourseBoard::new(fallback))
}

#[derive(Serialize)]
pub struct CoursesResponse {
    pub track: Track,
    pub title: &'static str,
    pub courses: Vec<CourseStatus>,
    pub completed: usize,
    pub total: usize,
    /// `completed / total × 100`, truncated for display.
    pub progress_percent: u32,
    pub all_complete: bool,
}

impl CoursesResponse {
    fn from_board(board: &CourseBoard) -> Self {
        Self {
            track: board.track(),
            title: board.track().title(),
            courses: board.courses(),
            completed: board.completed_count(),
            total: board.total(),
            progress_percent: board.progress_percent(),
            all_complete: board.all_complete(),
        }
    }
}

/// GET /api/v1/courses
///
/// Lazily creates the session's board from the persisted track, falling back
/// to the default track when none is set.
pub async fn handle_get_courses(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<CoursesResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let fallback = fallback_track(&state, q.session_id).await?;

    let mut boards = lock_boards(&state)?;
    let board = board_entry(&mut boards, q.session_id, fallback);
    Ok(Json(CoursesResponse::from_board(board)))
}

#[derive(Deserialize)]
pub struct SwitchTrackRequest {
    pub track: String,
}

/// PUT /api/v1/courses/track
///
/// Switching to a different track resets all completion flags.
pub async fn handle_switch_track(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
    Json(req): Json<SwitchTrackRequest>,
) -> Result<Json<CoursesResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let track = Track::parse(&req.track)
        .ok_or_else(|| AppError::Validation(format!("unknown track '{}'", req.track)))?;

    let mut boards = lock_boards(&state)?;
    let board = boards
        .entry(q.session_id)
        .or_insert_with(|| CourseBoard::new(track));
    board.switch_track(track);
    Ok(Json(CoursesResponse::from_board(board)))
}

/// POST /api/v1/courses/:id/complete
pub async fn handle_complete_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<CoursesResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let fallback = fallback_track(&state, q.session_id).await?;

    let mut boards = lock_boards(&state)?;
    let board = board_entry(&mut boards, q.session_id, fallback);
    board.mark_complete(&course_id)?;
    Ok(Json(CoursesResponse::from_board(board)))
}

#[derive(Serialize)]
pub struct FinishResponse {
    pub next: &'static str,
}

/// POST /api/v1/courses/finish
///
/// Terminal action: only available once every course on the active list is
/// complete.
pub async fn handle_finish_courses(
    State(state): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<FinishResponse>, AppError> {
    require_session(&state.store, q.session_id).await?;

    let fallback = fallback_track(&state, q.session_id).await?;

    let mut boards = lock_boards(&state)?;
    let board = board_entry(&mut boards, q.session_id, fallback);
    if !board.all_complete() {
        return Err(AppError::Validation(format!(
            "complete all courses first ({} of {} done)",
            board.completed_count(),
            board.total()
        )));
    }
    Ok(Json(FinishResponse {
        next: routes::COMPLETION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completing_works_without_a_prior_listing() {
        let mut boards = HashMap::new();
        let session_id = Uuid::new_v4();

        let board = board_entry(&mut boards, session_id, Track::Sde);
        assert_eq!(board.mark_complete("1"), Ok(true));
        assert_eq!(board.track(), Track::Sde);
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn test_board_entry_reuses_the_existing_board() {
        let mut boards = HashMap::new();
        let session_id = Uuid::new_v4();

        board_entry(&mut boards, session_id, Track::Fsd)
            .mark_complete("2")
            .unwrap();
        // A later call with a different fallback must not recreate the board.
        let board = board_entry(&mut boards, session_id, Track::UiUx);
        assert_eq!(board.track(), Track::Fsd);
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn test_fresh_board_is_not_finishable() {
        let mut boards = HashMap::new();
        let board = board_entry(&mut boards, Uuid::new_v4(), DEFAULT_TRACK);
        assert!(!board.all_complete());
    }
}
