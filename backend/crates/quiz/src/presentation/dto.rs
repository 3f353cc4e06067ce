//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Response for GET /api/AIAssistant/start-quiz
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizResponse {
    pub question: String,
    pub session_id: String,
}

/// Request for POST /api/AIAssistant/message
///
/// Both fields are nullable on the wire; presence is checked by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub text_message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for POST /api/AIAssistant/message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageResponse {
    pub text_message: String,
}

/// Response for GET /health
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
}
