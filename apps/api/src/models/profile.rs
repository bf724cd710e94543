use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Track;

/// Personal details captured on the first form step. Persisted wholesale —
/// a resubmission overwrites the whole record, never a field at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub qualification: String,
    pub institute: String,
    pub experience: String,
}

impl UserDetails {
    /// All fields must be non-empty (after trimming) before the flow can
    /// proceed. Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("dateOfBirth", &self.date_of_birth),
            ("qualification", &self.qualification),
            ("institute", &self.institute),
            ("experience", &self.experience),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(name);
            }
        }
        Ok(())
    }
}

/// Persisted outcome of a submitted quiz. The source flow discarded this
/// value; we keep it so the completion summary can show it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizResult {
    pub track: Track,
    pub correct: usize,
    pub total: usize,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> UserDetails {
        UserDetails {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: "1815-12-10".into(),
            qualification: "masters".into(),
            institute: "University of London".into(),
            experience: "3-5".into(),
        }
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_empty_field_names_the_offender() {
        let mut d = details();
        d.institute = "   ".into();
        assert_eq!(d.validate(), Err("institute"));
    }

    #[test]
    fn test_details_serde_uses_camel_case() {
        let json = serde_json::to_value(details()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("dateOfBirth").is_some());
        assert!(json.get("first_name").is_none());
    }
}
