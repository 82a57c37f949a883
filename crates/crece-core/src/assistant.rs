//! Career-advisor assistant backed by a generative-language API.
//!
//! The engine treats the assistant as an external collaborator: one request
//! with the user's message plus the available-course context, one
//! intent-tagged reply. A reply that fails to parse degrades to a generic
//! advice message; nothing on this path ever touches ledger state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog;
use crate::config::AssistantConfig;
use crate::error::{EngineError, Result};

/// How the assistant classified the user's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssistantIntent {
    RecommendCourses,
    Advice,
    SocialInteraction,
    OutOfScope,
}

/// One recommended course with the assistant's reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub id: String,
    pub reason: String,
}

/// Parsed assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub intent: AssistantIntent,
    pub message: String,
    pub recommendations: Vec<CourseRecommendation>,
}

/// Shown when the model's output cannot be parsed.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I had trouble processing that. Could you say it again?";

#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(rename = "type")]
    intent: AssistantIntent,
    message: String,
    #[serde(default)]
    data: Vec<CourseRecommendation>,
}

/// Strip markdown code fences the model tends to wrap JSON in, then parse.
/// Malformed bodies become a generic advice reply instead of an error.
pub fn parse_reply(raw: &str) -> AssistantReply {
    let cleaned = raw
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    match serde_json::from_str::<RawReply>(&cleaned) {
        Ok(reply) => {
            let recommendations = if reply.intent == AssistantIntent::RecommendCourses {
                // Drop recommendations that point outside the catalog.
                reply
                    .data
                    .into_iter()
                    .filter(|r| catalog::find(&r.id).is_some())
                    .collect()
            } else {
                Vec::new()
            };
            AssistantReply {
                intent: reply.intent,
                message: reply.message,
                recommendations,
            }
        }
        Err(e) => {
            warn!("assistant reply did not parse: {}", e);
            AssistantReply {
                intent: AssistantIntent::Advice,
                message: FALLBACK_MESSAGE.to_string(),
                recommendations: Vec::new(),
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct GeneratePart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateContent {
    parts: Vec<GenerateResponsePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateResponsePart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<GeneratePart>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: GenerateContent,
}

/// Client for the generative-language endpoint.
pub struct AssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Assistant(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn build_prompt(&self, user_name: &str, career: &str, text: &str) -> String {
        let course_list = catalog::available_courses()
            .iter()
            .map(|c| {
                format!(
                    "ID: {}, Title: {}, Related careers: [{}]",
                    c.id,
                    c.title,
                    c.related_careers.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a friendly career advisor for the Crece learning platform. \
Classify the user's message and reply helpfully.\n\n\
User:\n- Name: {user_name}\n- Career: {career}\n- Message: \"{text}\"\n\n\
Available courses:\n{course_list}\n\n\
Classify as one of:\n\
1. RECOMMEND_COURSES - the user wants to learn or improve skills.\n\
2. ADVICE - the user asks for career, interview or skills guidance.\n\
3. SOCIAL_INTERACTION - greetings and thanks.\n\
4. OUT_OF_SCOPE - unrelated to work or learning.\n\n\
Always return JSON only, shaped as:\n\
{{\"type\": \"RECOMMEND_COURSES\" | \"ADVICE\" | \"SOCIAL_INTERACTION\" | \"OUT_OF_SCOPE\",\n\
 \"message\": \"text for the user\",\n\
 \"data\": [{{\"id\": \"COURSE_ID\", \"reason\": \"why\"}}]}}\n\
Include \"data\" only for RECOMMEND_COURSES."
        )
    }

    /// Ask the assistant about `text`. Network and HTTP failures surface as
    /// `Assistant` errors for the caller to present; parse failures degrade
    /// to the generic fallback reply.
    pub async fn ask(&self, user_name: &str, career: &str, text: &str) -> Result<AssistantReply> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_url, self.config.model, self.config.api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![GeneratePart {
                    text: self.build_prompt(user_name, career, text),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Assistant(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Assistant(format!(
                "assistant returned {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Assistant(format!("unreadable response: {e}")))?;

        let raw_text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        Ok(parse_reply(&raw_text))
    }
}
