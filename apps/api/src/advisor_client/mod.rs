//! Advisor client — the single point of entry for all calls to the external
//! advisor service (quiz and roadmap generation).
//!
//! ARCHITECTURAL RULE: no other module may talk to the advisor endpoint
//! directly. Flow handlers depend on the [`AdvisorApi`] trait so they can be
//! exercised with a scripted advisor in tests.
//!
//! Policy: one attempt per call, no retry. The request future is owned by the
//! calling handler task, so a client disconnect cancels an in-flight request
//! instead of leaking it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisor returned status {status}")]
    Api { status: u16 },

    #[error("malformed advisor response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One question as delivered by the advisor. `correctAnswer` is trusted to be
/// a member of `options` only after [`crate::quiz::session::QuizSession`]
/// validates it.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestionPayload {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

#[async_trait]
pub trait AdvisorApi: Send + Sync {
    /// POST /generate_quiz with `{"domain": <track id>}`.
    async fn generate_quiz(&self, domain: &str) -> Result<Vec<QuizQuestionPayload>, AdvisorError>;

    /// POST /generate_roadmap with `{"role": <role>}`.
    async fn generate_roadmap(&self, role: &str) -> Result<String, AdvisorError>;
}

pub struct HttpAdvisorClient {
    client: Client,
    base_url: String,
}

impl HttpAdvisorClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<String, AdvisorError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[derive(Deserialize)]
struct RoadmapResponse {
    roadmap: String,
}

#[async_trait]
impl AdvisorApi for HttpAdvisorClient {
    async fn generate_quiz(&self, domain: &str) -> Result<Vec<QuizQuestionPayload>, AdvisorError> {
        let body = serde_json::json!({ "domain": domain });
        let text = self.post_json("/generate_quiz", body).await?;
        let questions: Vec<QuizQuestionPayload> = serde_json::from_str(&text)?;
        debug!("Advisor returned {} questions for '{domain}'", questions.len());
        Ok(questions)
    }

    async fn generate_roadmap(&self, role: &str) -> Result<String, AdvisorError> {
        let body = serde_json::json!({ "role": role });
        let text = self.post_json("/generate_roadmap", body).await?;
        let parsed: RoadmapResponse = serde_json::from_str(&text)?;
        Ok(parsed.roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_payload_deserializes_camel_case_correct_answer() {
        let json = r#"[{"question":"Q1","options":["A","B"],"correctAnswer":"A"}]"#;
        let parsed: Vec<QuizQuestionPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].correct_answer, "A");
        assert_eq!(parsed[0].options, vec!["A", "B"]);
    }

    #[test]
    fn test_quiz_payload_rejects_missing_fields() {
        let json = r#"[{"question":"Q1","options":["A","B"]}]"#;
        assert!(serde_json::from_str::<Vec<QuizQuestionPayload>>(json).is_err());
    }

    #[test]
    fn test_roadmap_response_shape() {
        let parsed: RoadmapResponse =
            serde_json::from_str(r#"{"roadmap":"Month 1-3: fundamentals"}"#).unwrap();
        assert_eq!(parsed.roadmap, "Month 1-3: fundamentals");
    }
}
