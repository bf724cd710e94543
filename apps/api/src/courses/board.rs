//! Per-session course recommendation board.
//!
//! Completion flags are memory-only and monotonic within a visit: a course
//! can go false → true but never back, except through a track switch, which
//! resets the whole board (no cross-track memory of prior completion).

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{courses, CourseDef, Difficulty, Track};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no course with id '{0}' in the active track")]
pub struct UnknownCourse(pub String);

/// One course plus its board-local completion flag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CourseStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    pub video_url: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct CourseBoard {
    track: Track,
    completed: BTreeSet<&'static str>,
}

impl CourseBoard {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            completed: BTreeSet::new(),
        }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    fn catalog(&self) -> &'static [CourseDef] {
        courses(self.track)
    }

    pub fn courses(&self) -> Vec<CourseStatus> {
        self.catalog()
            .iter()
            .map(|c| CourseStatus {
                id: c.id,
                title: c.title,
                description: c.description,
                duration: c.duration,
                difficulty: c.difficulty,
                video_url: c.video_url,
                completed: self.completed.contains(c.id),
            })
            .collect()
    }

    /// Marks a course complete. Monotonic and idempotent: re-marking a
    /// completed course is a no-op. Returns whether the flag changed.
    pub fn mark_complete(&mut self, course_id: &str) -> Result<bool, UnknownCourse> {
        let course = self
            .catalog()
            .iter()
            .find(|c| c.id == course_id)
            .ok_or_else(|| UnknownCourse(course_id.to_string()))?;
        Ok(self.completed.insert(course.id))
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn total(&self) -> usize {
        self.catalog().len()
    }

    /// Aggregate progress: `completed / total × 100`, truncated for display.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.completed.len() * 100 / total) as u32
    }

    pub fn all_complete(&self) -> bool {
        self.completed.len() == self.total()
    }

    /// Switches the active track. Selecting a different track resets all
    /// completion flags; re-selecting the current one is a no-op. Returns
    /// whether the board was reset.
    pub fn switch_track(&mut self, track: Track) -> bool {
        if track == self.track {
            return false;
        }
        self.track = track;
        self.completed.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_complete_is_monotonic_and_idempotent() {
        let mut board = CourseBoard::new(Track::Sde);
        assert_eq!(board.mark_complete("1"), Ok(true));
        assert_eq!(board.mark_complete("1"), Ok(false));
        assert_eq!(board.completed_count(), 1);
        assert!(board.courses()[0].completed);
    }

    #[test]
    fn test_unknown_course_id_is_rejected() {
        let mut board = CourseBoard::new(Track::Fsd);
        assert_eq!(
            board.mark_complete("99"),
            Err(UnknownCourse("99".to_string()))
        );
    }

    #[test]
    fn test_progress_percent_truncates() {
        let mut board = CourseBoard::new(Track::UiUx);
        assert_eq!(board.progress_percent(), 0);
        board.mark_complete("1").unwrap();
        // 1 of 4 = 25
        assert_eq!(board.progress_percent(), 25);
        board.mark_complete("2").unwrap();
        board.mark_complete("3").unwrap();
        // 3 of 4 = 75
        assert_eq!(board.progress_percent(), 75);
    }

    #[test]
    fn test_all_complete_unlocks_finish() {
        let mut board = CourseBoard::new(Track::DataScience);
        for id in ["1", "2", "3", "4"] {
            board.mark_complete(id).unwrap();
        }
        assert!(board.all_complete());
        assert_eq!(board.progress_percent(), 100);
    }

    #[test]
    fn test_switching_track_resets_completion() {
        let mut board = CourseBoard::new(Track::Sde);
        board.mark_complete("1").unwrap();
        board.mark_complete("2").unwrap();

        assert!(board.switch_track(Track::Fsd));
        assert_eq!(board.track(), Track::Fsd);
        assert_eq!(board.completed_count(), 0);
        assert!(board.courses().iter().all(|c| !c.completed));
    }

    #[test]
    fn test_reselecting_current_track_keeps_completion() {
        let mut board = CourseBoard::new(Track::Sde);
        board.mark_complete("1").unwrap();
        assert!(!board.switch_track(Track::Sde));
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn test_no_sequence_of_marks_reverts_a_completed_course() {
        let mut board = CourseBoard::new(Track::Fsd);
        board.mark_complete("3").unwrap();
        for id in ["1", "2", "3", "4", "3", "3"] {
            board.mark_complete(id).unwrap();
        }
        assert!(board.courses().iter().all(|c| c.completed));
    }
}
