//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use crate::application::quiz_service::QuizSessionService;
use crate::application::validation::validate_submit_answer;
use crate::domain::gateway::{AssistantGateway, DeviceMessenger};
use crate::domain::repository::SessionRepository;
use crate::error::{QuizError, QuizResult};
use crate::presentation::dto::{
    HealthResponse, StartQuizResponse, SubmitMessageRequest, SubmitMessageResponse,
};

/// Shared state for quiz handlers
pub struct QuizAppState<S, A, D>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    pub service: Arc<QuizSessionService<S, A, D>>,
}

// Manual impl: only the Arc is cloned, the collaborators need not be Clone.
impl<S, A, D> Clone for QuizAppState<S, A, D>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// GET /api/AIAssistant/start-quiz
pub async fn start_quiz<S, A, D>(
    State(state): State<QuizAppState<S, A, D>>,
) -> QuizResult<Json<StartQuizResponse>>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    let output = state.service.start_quiz().await?;

    Ok(Json(StartQuizResponse {
        question: output.question,
        session_id: output.session_id.to_string(),
    }))
}

/// POST /api/AIAssistant/message
pub async fn submit_message<S, A, D>(
    State(state): State<QuizAppState<S, A, D>>,
    payload: Result<Json<Option<SubmitMessageRequest>>, JsonRejection>,
) -> QuizResult<Json<SubmitMessageResponse>>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| QuizError::MalformedRequestBody(e.body_text()))?;
    // a `null` body is a missing request object, not malformed JSON
    let req = req.ok_or(QuizError::AtLeastOneNullParameter)?;

    let input = validate_submit_answer(req.text_message, req.session_id)?;
    let output = state.service.submit_answer(input).await?;

    Ok(Json(SubmitMessageResponse {
        text_message: output.reply,
    }))
}

/// GET /health
pub async fn health<S, A, D>(
    State(state): State<QuizAppState<S, A, D>>,
) -> QuizResult<Json<HealthResponse>>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    let active_sessions = state.service.sessions().count().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        active_sessions,
    }))
}
