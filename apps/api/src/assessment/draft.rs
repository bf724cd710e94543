//! Skill self-assessment: toggle tracking and the known/unknown split.
//!
//! Pure flow logic, no I/O. The handler layer reconstructs a draft from the
//! profile store on every request and writes it back after each toggle.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{assessment_skills, Track};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("'{0}' is not a skill in this track's catalog")]
    UnknownSkill(String),

    #[error("select at least one known skill before submitting")]
    EmptySubmission,
}

/// The split produced by a submitted assessment. Both lists follow catalog
/// order; together they partition the track's full skill catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkillSplit {
    pub known: Vec<String>,
    pub unknown: Vec<String>,
}

/// An in-progress assessment for one track.
#[derive(Debug, Clone)]
pub struct AssessmentDraft {
    track: Track,
    known: HashSet<String>,
}

impl AssessmentDraft {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            known: HashSet::new(),
        }
    }

    /// Rebuilds a draft from a stored known-set, silently dropping anything
    /// that is no longer in the catalog (e.g. after a track change mid-draft).
    pub fn with_known<I, S>(track: Track, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog: HashSet<&str> = assessment_skills(track).iter().copied().collect();
        let known = known
            .into_iter()
            .map(Into::into)
            .filter(|s| catalog.contains(s.as_str()))
            .collect();
        Self { track, known }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    /// Idempotently flips one skill's membership in the known-set. Returns
    /// whether the skill is known after the flip.
    pub fn toggle(&mut self, skill: &str) -> Result<bool, AssessmentError> {
        if !assessment_skills(self.track).contains(&skill) {
            return Err(AssessmentError::UnknownSkill(skill.to_string()));
        }
        if self.known.remove(skill) {
            Ok(false)
        } else {
            self.known.insert(skill.to_string());
            Ok(true)
        }
    }

    pub fn is_known(&self, skill: &str) -> bool {
        self.known.contains(skill)
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn total(&self) -> usize {
        assessment_skills(self.track).len()
    }

    /// Known skills in catalog order, for storage and display.
    pub fn known_in_order(&self) -> Vec<String> {
        assessment_skills(self.track)
            .iter()
            .filter(|s| self.known.contains(**s))
            .map(|s| s.to_string())
            .collect()
    }

    /// Display-only coverage: `known / total × 100`, rounded.
    pub fn coverage_percent(&self) -> u32 {
        (self.known.len() as f64 / self.total() as f64 * 100.0).round() as u32
    }

    /// Computes the final split. Precondition: at least one known skill.
    pub fn submit(&self) -> Result<SkillSplit, AssessmentError> {
        if self.known.is_empty() {
            return Err(AssessmentError::EmptySubmission);
        }
        let (known, unknown): (Vec<String>, Vec<String>) = assessment_skills(self.track)
            .iter()
            .map(|s| s.to_string())
            .partition(|s| self.known.contains(s));
        Ok(SkillSplit { known, unknown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let mut draft = AssessmentDraft::new(Track::Sde);
        assert_eq!(draft.toggle("Data Structures"), Ok(true));
        assert_eq!(draft.toggle("Data Structures"), Ok(false));
        assert_eq!(draft.known_count(), 0);
    }

    #[test]
    fn test_toggle_rejects_skill_outside_catalog() {
        let mut draft = AssessmentDraft::new(Track::Fsd);
        assert_eq!(
            draft.toggle("Quantum Computing"),
            Err(AssessmentError::UnknownSkill("Quantum Computing".into()))
        );
    }

    #[test]
    fn test_submit_with_empty_known_set_is_rejected() {
        let draft = AssessmentDraft::new(Track::UiUx);
        assert_eq!(draft.submit(), Err(AssessmentError::EmptySubmission));
    }

    #[test]
    fn test_split_partitions_the_catalog_for_any_toggle_sequence() {
        for track in Track::ALL {
            let mut draft = AssessmentDraft::new(track);
            let catalog = assessment_skills(track);
            // Arbitrary toggle sequence with repeats.
            draft.toggle(catalog[0]).unwrap();
            draft.toggle(catalog[3]).unwrap();
            draft.toggle(catalog[3]).unwrap();
            draft.toggle(catalog[7]).unwrap();
            draft.toggle(catalog[0]).unwrap();
            draft.toggle(catalog[0]).unwrap();

            let split = draft.submit().unwrap();
            let known: HashSet<_> = split.known.iter().cloned().collect();
            let unknown: HashSet<_> = split.unknown.iter().cloned().collect();
            assert!(known.is_disjoint(&unknown));

            let mut union: Vec<_> = known.union(&unknown).cloned().collect();
            union.sort();
            let mut full: Vec<_> = catalog.iter().map(|s| s.to_string()).collect();
            full.sort();
            assert_eq!(union, full);
        }
    }

    #[test]
    fn test_all_known_yields_empty_unknown_set_and_full_coverage() {
        let mut draft = AssessmentDraft::new(Track::Fsd);
        for skill in assessment_skills(Track::Fsd) {
            draft.toggle(skill).unwrap();
        }
        assert_eq!(draft.coverage_percent(), 100);
        let split = draft.submit().unwrap();
        assert!(split.unknown.is_empty());
        assert_eq!(split.known.len(), 12);
    }

    #[test]
    fn test_coverage_percent_rounds() {
        let mut draft = AssessmentDraft::new(Track::Sde);
        draft.toggle("Data Structures").unwrap();
        // 1 of 12 = 8.33% -> 8
        assert_eq!(draft.coverage_percent(), 8);
        draft.toggle("Problem Solving").unwrap();
        // 2 of 12 = 16.67% -> 17
        assert_eq!(draft.coverage_percent(), 17);
    }

    #[test]
    fn test_split_preserves_catalog_order() {
        let mut draft = AssessmentDraft::new(Track::Sde);
        draft.toggle("Problem Solving").unwrap();
        draft.toggle("Data Structures").unwrap();
        let split = draft.submit().unwrap();
        assert_eq!(split.known, vec!["Data Structures", "Problem Solving"]);
        assert_eq!(split.unknown[0], "Algorithms & Complexity");
    }

    #[test]
    fn test_with_known_drops_out_of_catalog_entries() {
        let draft =
            AssessmentDraft::with_known(Track::Fsd, ["React.js".to_string(), "Cooking".to_string()]);
        assert_eq!(draft.known_count(), 1);
        assert!(draft.is_known("React.js"));
    }
}
