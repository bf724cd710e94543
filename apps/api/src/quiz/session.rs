//! Quiz visit state: `Idle → Loading → {Ready | Failed} → Submitted`.
//!
//! `Idle`/`Loading`/`Failed` are transient phases of the start handler (no
//! session exists yet, the upstream call is in flight, or it failed); a
//! constructed [`QuizSession`] is the `Ready` state and `Submitted` is
//! terminal for the visit. Sessions are memory-only: a refetch replaces the
//! session wholesale and question ids are not stable across refetches.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::advisor_client::QuizQuestionPayload;
use crate::catalog::Track;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz service returned no questions")]
    Empty,

    #[error("correct answer '{answer}' is not among the options of question {id}")]
    CorruptQuestion { id: u32, answer: String },

    #[error("no question with id {0}")]
    UnknownQuestion(u32),

    #[error("'{selected}' is not an option for question {id}")]
    UnknownOption { id: u32, selected: String },

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error("answer all questions before submitting ({answered} of {total} answered)")]
    Incomplete { answered: usize, total: usize },
}

/// A question held server-side. The correct answer is never serialized, so
/// responses built from this type cannot leak it before submission.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing)]
    correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Ready,
    Submitted,
}

/// Per-question grading outcome, revealed only by submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionResult {
    pub id: u32,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuizReport {
    pub results: Vec<QuestionResult>,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    track: Track,
    questions: Vec<QuizQuestion>,
    answers: BTreeMap<u32, String>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Builds a `Ready` session from an advisor payload, assigning 1-based
    /// sequence ids at receipt. A correct answer outside its own option list
    /// is a data error, not a crash.
    pub fn from_payload(
        track: Track,
        payload: Vec<QuizQuestionPayload>,
    ) -> Result<Self, QuizError> {
        if payload.is_empty() {
            return Err(QuizError::Empty);
        }

        let mut questions = Vec::with_capacity(payload.len());
        for (index, q) in payload.into_iter().enumerate() {
            let id = index as u32 + 1;
            if !q.options.contains(&q.correct_answer) {
                return Err(QuizError::CorruptQuestion {
                    id,
                    answer: q.correct_answer,
                });
            }
            questions.push(QuizQuestion {
                id,
                question: q.question,
                options: q.options,
                correct_answer: q.correct_answer,
            });
        }

        Ok(Self {
            track,
            questions,
            answers: BTreeMap::new(),
            phase: QuizPhase::Ready,
        })
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Records a single-choice answer. At most one answer per question id —
    /// re-answering overwrites. Rejected once the visit is submitted.
    pub fn record_answer(&mut self, id: u32, selected: String) -> Result<(), QuizError> {
        if self.phase == QuizPhase::Submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.id == id)
            .ok_or(QuizError::UnknownQuestion(id))?;
        if !question.options.contains(&selected) {
            return Err(QuizError::UnknownOption { id, selected });
        }
        self.answers.insert(id, selected);
        Ok(())
    }

    /// Grades the visit: per-question string equality, no partial credit.
    /// Allowed only when every question has exactly one recorded answer.
    /// Terminal: further answers and submissions are rejected.
    pub fn submit(&mut self) -> Result<QuizReport, QuizError> {
        if self.phase == QuizPhase::Submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        if !self.all_answered() {
            return Err(QuizError::Incomplete {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }

        let results: Vec<QuestionResult> = self
            .questions
            .iter()
            .map(|q| {
                // all_answered guarantees presence
                let selected = self.answers[&q.id].clone();
                let is_correct = selected == q.correct_answer;
                QuestionResult {
                    id: q.id,
                    selected,
                    correct_answer: q.correct_answer.clone(),
                    is_correct,
                }
            })
            .collect();

        let correct = results.iter().filter(|r| r.is_correct).count();
        let total = results.len();
        self.phase = QuizPhase::Submitted;

        Ok(QuizReport {
            results,
            correct,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(n: usize) -> Vec<QuizQuestionPayload> {
        (0..n)
            .map(|i| QuizQuestionPayload {
                question: format!("Q{}", i + 1),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: "A".into(),
            })
            .collect()
    }

    #[test]
    fn test_questions_get_one_based_sequence_ids() {
        let session = QuizSession::from_payload(Track::Sde, payload(3)).unwrap();
        let ids: Vec<u32> = session.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(session.phase(), QuizPhase::Ready);
    }

    #[test]
    fn test_empty_payload_is_a_data_error() {
        assert_eq!(
            QuizSession::from_payload(Track::Fsd, vec![]).unwrap_err(),
            QuizError::Empty
        );
    }

    #[test]
    fn test_correct_answer_outside_options_is_a_data_error() {
        let mut bad = payload(1);
        bad[0].correct_answer = "E".into();
        assert_eq!(
            QuizSession::from_payload(Track::Fsd, bad).unwrap_err(),
            QuizError::CorruptQuestion {
                id: 1,
                answer: "E".into()
            }
        );
    }

    #[test]
    fn test_submit_gated_until_every_question_answered() {
        let mut session = QuizSession::from_payload(Track::Sde, payload(3)).unwrap();
        session.record_answer(1, "A".into()).unwrap();
        session.record_answer(2, "B".into()).unwrap();
        assert_eq!(
            session.submit().unwrap_err(),
            QuizError::Incomplete {
                answered: 2,
                total: 3
            }
        );
        session.record_answer(3, "A".into()).unwrap();
        assert!(session.all_answered());
        assert!(session.submit().is_ok());
    }

    #[test]
    fn test_grading_is_per_question_string_equality() {
        let mut session = QuizSession::from_payload(Track::Sde, payload(3)).unwrap();
        session.record_answer(1, "A".into()).unwrap();
        session.record_answer(2, "B".into()).unwrap();
        session.record_answer(3, "A".into()).unwrap();
        let report = session.submit().unwrap();
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 3);
        assert!(report.results[0].is_correct);
        assert!(!report.results[1].is_correct);
    }

    #[test]
    fn test_reanswering_overwrites_single_slot() {
        let mut session = QuizSession::from_payload(Track::Fsd, payload(1)).unwrap();
        session.record_answer(1, "B".into()).unwrap();
        session.record_answer(1, "A".into()).unwrap();
        assert_eq!(session.answered(), 1);
        let report = session.submit().unwrap();
        assert!(report.results[0].is_correct);
    }

    #[test]
    fn test_unknown_question_and_option_are_rejected() {
        let mut session = QuizSession::from_payload(Track::Fsd, payload(1)).unwrap();
        assert_eq!(
            session.record_answer(9, "A".into()).unwrap_err(),
            QuizError::UnknownQuestion(9)
        );
        assert_eq!(
            session.record_answer(1, "Z".into()).unwrap_err(),
            QuizError::UnknownOption {
                id: 1,
                selected: "Z".into()
            }
        );
    }

    #[test]
    fn test_submitted_is_terminal() {
        let mut session = QuizSession::from_payload(Track::Fsd, payload(1)).unwrap();
        session.record_answer(1, "A".into()).unwrap();
        session.submit().unwrap();
        assert_eq!(session.phase(), QuizPhase::Submitted);
        assert_eq!(
            session.record_answer(1, "B".into()).unwrap_err(),
            QuizError::AlreadySubmitted
        );
        assert_eq!(session.submit().unwrap_err(), QuizError::AlreadySubmitted);
    }

    #[test]
    fn test_serialized_question_never_includes_correct_answer() {
        let session = QuizSession::from_payload(Track::Sde, payload(1)).unwrap();
        let json = serde_json::to_value(&session.questions()[0]).unwrap();
        assert!(json.get("correct_answer").is_none());
        assert!(json.get("correctAnswer").is_none());
        assert!(json.get("options").is_some());
    }

    #[test]
    fn test_single_question_scenario_from_advisor_sample() {
        // POST /generate_quiz {"domain":"sde"} ->
        //   [{"question":"Q1","options":["A","B"],"correctAnswer":"A"}]
        let sample = vec![QuizQuestionPayload {
            question: "Q1".into(),
            options: vec!["A".into(), "B".into()],
            correct_answer: "A".into(),
        }];
        let mut session = QuizSession::from_payload(Track::Sde, sample).unwrap();
        assert_eq!(session.total(), 1);
        assert_eq!(session.questions()[0].options.len(), 2);
        session.record_answer(1, "A".into()).unwrap();
        let report = session.submit().unwrap();
        assert_eq!(report.correct, 1);
        assert!(report.results[0].is_correct);
    }
}
