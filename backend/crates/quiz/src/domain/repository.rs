//! Repository Traits
//!
//! Interfaces for session storage. Implementation is in infrastructure layer.

use crate::domain::entities::QuizSession;
use crate::error::QuizResult;
use kernel::id::SessionId;
use std::time::Duration;

/// Quiz session repository trait
///
/// Expired and unknown sessions are indistinguishable to callers: both read as `None`.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Insert or overwrite a session; the TTL starts now
    async fn put(
        &self,
        session_id: SessionId,
        question_text: &str,
        ttl: Duration,
    ) -> QuizResult<QuizSession>;

    /// Get a live session by ID
    async fn get(&self, session_id: SessionId) -> QuizResult<Option<QuizSession>>;

    /// Remove every expired session, returning how many were removed
    async fn purge_expired(&self) -> QuizResult<usize>;

    /// Number of stored sessions, including any not yet swept
    async fn count(&self) -> QuizResult<usize>;
}
