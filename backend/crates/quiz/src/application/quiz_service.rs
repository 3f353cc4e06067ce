//! Quiz Session Service
//!
//! Starts quiz sessions and relays answers to the assistant.

use kernel::id::SessionId;
use serde::Serialize;
use std::sync::Arc;

use crate::application::config::QuizConfig;
use crate::application::validation::SubmitAnswerInput;
use crate::domain::gateway::{AssistantGateway, DeliveryError, DeviceMessenger};
use crate::domain::question_bank::QuestionBank;
use crate::domain::repository::SessionRepository;
use crate::domain::services::compose_prompt;
use crate::error::{QuizError, QuizResult};

/// Where assistant replies are mirrored, decided once at startup
pub enum ReplyDelivery<D> {
    /// Publish every reply to one device
    Device { messenger: Arc<D>, device_id: String },
    /// No device hub configured
    Disabled,
}

impl<D> ReplyDelivery<D> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ReplyDelivery::Device { .. })
    }
}

/// Payload published to the device
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceReplyPayload<'a> {
    text_message: &'a str,
}

/// Output DTO for start quiz
#[derive(Debug, Clone)]
pub struct StartQuizOutput {
    pub session_id: SessionId,
    pub question: String,
    pub expires_at_ms: i64,
}

/// Output DTO for submit answer
#[derive(Debug, Clone)]
pub struct SubmitAnswerOutput {
    pub reply: String,
}

/// Quiz Session Service
pub struct QuizSessionService<S, A, D>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    sessions: Arc<S>,
    assistant: Arc<A>,
    bank: QuestionBank,
    delivery: ReplyDelivery<D>,
    config: Arc<QuizConfig>,
}

impl<S, A, D> QuizSessionService<S, A, D>
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    pub fn new(
        sessions: Arc<S>,
        assistant: Arc<A>,
        bank: QuestionBank,
        delivery: ReplyDelivery<D>,
        config: Arc<QuizConfig>,
    ) -> Self {
        Self {
            sessions,
            assistant,
            bank,
            delivery,
            config,
        }
    }

    pub fn sessions(&self) -> &Arc<S> {
        &self.sessions
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    pub fn delivery_enabled(&self) -> bool {
        self.delivery.is_enabled()
    }

    /// Pick a question and open a session for it
    pub async fn start_quiz(&self) -> QuizResult<StartQuizOutput> {
        let entry = self.bank.pick_random()?;

        let session_id = SessionId::new();
        let session = self
            .sessions
            .put(session_id, &entry.question_text, self.config.session_ttl)
            .await?;

        tracing::info!(
            session_id = %session.id,
            expires_at_ms = session.expires_at_ms,
            "Quiz session started"
        );

        Ok(StartQuizOutput {
            session_id: session.id,
            question: session.question_text,
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Grade an answer for a live session
    ///
    /// The session stays open afterwards; it can be answered again until it expires.
    pub async fn submit_answer(&self, input: SubmitAnswerInput) -> QuizResult<SubmitAnswerOutput> {
        // A malformed id can never name a session
        let session_id =
            SessionId::parse(&input.session_id).ok_or(QuizError::NoActiveQuestion)?;

        let session = self
            .sessions
            .get(session_id)
            .await?
            .ok_or(QuizError::NoActiveQuestion)?;

        let prompt = compose_prompt(
            &self.config.instruction,
            &session.question_text,
            &input.answer_text,
        );

        tracing::debug!(
            session_id = %session.id,
            prompt_len = prompt.len(),
            "Sending answer to assistant"
        );

        let reply = self.assistant.send_message(&prompt).await?;

        tracing::info!(
            session_id = %session.id,
            reply_len = reply.len(),
            "Assistant replied"
        );

        self.deliver_reply(session.id, &reply).await;

        Ok(SubmitAnswerOutput { reply })
    }

    /// Best-effort device delivery. Failures are logged and dropped.
    async fn deliver_reply(&self, session_id: SessionId, reply: &str) {
        let ReplyDelivery::Device {
            messenger,
            device_id,
        } = &self.delivery
        else {
            return;
        };

        let payload = match serde_json::to_vec(&DeviceReplyPayload {
            text_message: reply,
        }) {
            Ok(payload) => payload,
            Err(e) => {
                let error = DeliveryError::Serialization(e.to_string());
                tracing::warn!(session_id = %session_id, error = %error, "Device delivery skipped");
                return;
            }
        };

        let attempt = messenger.send(device_id, payload);
        let error = match tokio::time::timeout(self.config.delivery_timeout, attempt).await {
            Ok(Ok(())) => {
                tracing::debug!(session_id = %session_id, device_id = %device_id, "Reply delivered to device");
                return;
            }
            Ok(Err(e)) => e,
            Err(_) => DeliveryError::Timeout,
        };

        tracing::warn!(
            session_id = %session_id,
            device_id = %device_id,
            error = %error,
            "Device delivery failed, continuing"
        );
    }
}
