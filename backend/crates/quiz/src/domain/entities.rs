//! Domain Entities
//!
//! Core business entities for the quiz domain.

use kernel::id::SessionId;

/// One configured question, split from its raw form
/// `"{question}{delimiter}{metadata}"`.
///
/// The metadata (usually the expected answer) is kept but not used for grading;
/// the assistant judges the answer on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    pub question_text: String,
    pub metadata: Option<String>,
}

impl QuestionEntry {
    /// Parse a raw configured entry. Returns `None` when the question part is blank.
    pub fn parse(raw: &str, delimiter: &str) -> Option<Self> {
        let (question, metadata) = match raw.split_once(delimiter) {
            Some((q, m)) if !delimiter.is_empty() => (q, Some(m.trim())),
            _ => (raw, None),
        };

        let question_text = question.trim();
        if question_text.is_empty() {
            return None;
        }

        Some(Self {
            question_text: question_text.to_string(),
            metadata: metadata.filter(|m| !m.is_empty()).map(str::to_string),
        })
    }
}

/// QuizSession entity - binds a session id to one question until it expires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub id: SessionId,
    pub question_text: String,
    pub created_at_ms: i64,
    pub expires_at_ms: i64,
}

impl QuizSession {
    pub fn new(id: SessionId, question_text: String, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            id,
            question_text,
            created_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
        }
    }

    /// Expired once `now_ms` reaches `expires_at_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}
