//! Redis-backed persisted profile store.
//!
//! The sole durable owner of cross-step flow state. Keys are namespaced per
//! session (`profile:{session_id}:{field}`); values are serialized records
//! written wholesale. Absence of a key is the empty default, never an error.
//! There is deliberately no second in-memory copy of any of these fields:
//! every step re-reads the store, so the two-copies-disagree class of bugs
//! cannot occur.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::catalog::Track;
use crate::errors::AppError;
use crate::models::profile::{QuizResult, UserDetails};

const KEY_USER_DETAILS: &str = "userDetails";
const KEY_SELECTED_TRACK: &str = "selectedTrack";
const KEY_KNOWN_SKILLS: &str = "knownSkills";
const KEY_UNKNOWN_SKILLS: &str = "unknownSkills";
const KEY_ASSESSMENT_DRAFT: &str = "assessmentDraft";
const KEY_QUIZ_RESULT: &str = "quizResult";

#[derive(Clone)]
pub struct ProfileStore {
    client: redis::Client,
}

impl ProfileStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn conn(&self) -> Result<MultiplexedConnection, AppError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    fn key(session_id: Uuid, field: &str) -> String {
        format!("profile:{session_id}:{field}")
    }

    // ---- sessions -------------------------------------------------------

    /// Mints a new session for a logged-in user. Sessions have no TTL.
    pub async fn create_session(&self, user_id: Uuid) -> Result<Uuid, AppError> {
        let session_id = Uuid::new_v4();
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(format!("session:{session_id}"), user_id.to_string())
            .await?;
        Ok(session_id)
    }

    /// Resolves a session id to its user, or `None` for unknown sessions.
    pub async fn session_user(&self, session_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(format!("session:{session_id}")).await?;
        Ok(raw.and_then(|s| Uuid::parse_str(&s).ok()))
    }

    // ---- user details ---------------------------------------------------

    pub async fn user_details(&self, session_id: Uuid) -> Result<Option<UserDetails>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(Self::key(session_id, KEY_USER_DETAILS)).await?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    pub async fn put_user_details(
        &self,
        session_id: Uuid,
        details: &UserDetails,
    ) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(
                Self::key(session_id, KEY_USER_DETAILS),
                serde_json::to_string(details)?,
            )
            .await?;
        Ok(())
    }

    // ---- track selection ------------------------------------------------

    /// The persisted track, stored as a plain string. An unrecognized stored
    /// value reads as `None` so downstream steps fail closed.
    pub async fn selected_track(&self, session_id: Uuid) -> Result<Option<Track>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(Self::key(session_id, KEY_SELECTED_TRACK)).await?;
        Ok(raw.as_deref().and_then(Track::parse))
    }

    pub async fn put_selected_track(&self, session_id: Uuid, track: Track) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(Self::key(session_id, KEY_SELECTED_TRACK), track.as_str())
            .await?;
        Ok(())
    }

    // ---- skill assessment -----------------------------------------------

    /// In-progress known-set for the assessment step; empty when no toggles
    /// have been recorded yet.
    pub async fn assessment_draft(&self, session_id: Uuid) -> Result<Vec<String>, AppError> {
        self.string_list(session_id, KEY_ASSESSMENT_DRAFT).await
    }

    pub async fn put_assessment_draft(
        &self,
        session_id: Uuid,
        known: &[String],
    ) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(
                Self::key(session_id, KEY_ASSESSMENT_DRAFT),
                serde_json::to_string(known)?,
            )
            .await?;
        Ok(())
    }

    /// Persists a submitted split wholesale (retakes overwrite) and clears
    /// the draft.
    pub async fn put_skill_split(
        &self,
        session_id: Uuid,
        known: &[String],
        unknown: &[String],
    ) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(
                Self::key(session_id, KEY_KNOWN_SKILLS),
                serde_json::to_string(known)?,
            )
            .await?;
        let _: () = conn
            .set(
                Self::key(session_id, KEY_UNKNOWN_SKILLS),
                serde_json::to_string(unknown)?,
            )
            .await?;
        let _: () = conn.del(Self::key(session_id, KEY_ASSESSMENT_DRAFT)).await?;
        Ok(())
    }

    pub async fn known_skills(&self, session_id: Uuid) -> Result<Vec<String>, AppError> {
        self.string_list(session_id, KEY_KNOWN_SKILLS).await
    }

    pub async fn unknown_skills(&self, session_id: Uuid) -> Result<Vec<String>, AppError> {
        self.string_list(session_id, KEY_UNKNOWN_SKILLS).await
    }

    // ---- quiz result ----------------------------------------------------

    pub async fn put_quiz_result(
        &self,
        session_id: Uuid,
        result: &QuizResult,
    ) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set(
                Self::key(session_id, KEY_QUIZ_RESULT),
                serde_json::to_string(result)?,
            )
            .await?;
        Ok(())
    }

    pub async fn quiz_result(&self, session_id: Uuid) -> Result<Option<QuizResult>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(Self::key(session_id, KEY_QUIZ_RESULT)).await?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    async fn string_list(&self, session_id: Uuid, field: &str) -> Result<Vec<String>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(Self::key(session_id, field)).await?;
        match raw {
            Some(s) => Ok(serde_json::from_str(&s)?),
            None => Ok(Vec::new()),
        }
    }
}
