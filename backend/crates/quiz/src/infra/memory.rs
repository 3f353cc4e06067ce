//! In-Memory Session Store
//!
//! Process-local TTL cache for quiz sessions. Sessions are lost on restart.

use dashmap::DashMap;
use kernel::id::SessionId;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::QuizSession;
use crate::domain::repository::SessionRepository;
use crate::error::QuizResult;

/// DashMap-backed session store
///
/// Entries are sharded, so sessions with different ids never contend.
/// Expired entries are evicted when read and by [`spawn_session_sweeper`].
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, QuizSession>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn put(
        &self,
        session_id: SessionId,
        question_text: &str,
        ttl: Duration,
    ) -> QuizResult<QuizSession> {
        let session = QuizSession::new(
            session_id,
            question_text.to_string(),
            self.clock.now_ms(),
            i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        );
        self.sessions.insert(session_id, session.clone());
        Ok(session)
    }

    async fn get(&self, session_id: SessionId) -> QuizResult<Option<QuizSession>> {
        let now_ms = self.clock.now_ms();

        if self
            .sessions
            .remove_if(&session_id, |_, session| session.is_expired_at(now_ms))
            .is_some()
        {
            tracing::debug!(session_id = %session_id, "Evicted expired session on read");
            return Ok(None);
        }

        Ok(self
            .sessions
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .filter(|session| !session.is_expired_at(now_ms)))
    }

    async fn purge_expired(&self) -> QuizResult<usize> {
        let now_ms = self.clock.now_ms();
        let mut removed = 0usize;

        self.sessions.retain(|_, session| {
            let keep = !session.is_expired_at(now_ms);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }

    async fn count(&self) -> QuizResult<usize> {
        Ok(self.sessions.len())
    }
}

/// Periodically purge expired sessions until the runtime shuts down
pub fn spawn_session_sweeper<S>(repo: Arc<S>, every: Duration) -> JoinHandle<()>
where
    S: SessionRepository + Send + Sync + 'static,
{
    let every = every.max(Duration::from_secs(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match repo.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::info!(sessions_deleted = removed, "Expired quiz sessions swept");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session sweep failed, retrying next tick");
                }
            }
        }
    })
}
