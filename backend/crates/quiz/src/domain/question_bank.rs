//! Question Bank
//!
//! Holds the configured questions and picks one per session.

use rand::Rng;

use crate::domain::entities::QuestionEntry;
use crate::error::{QuizError, QuizResult};

/// Source of uniformly distributed indices
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`. Only called with `len > 0`.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local RNG from `rand`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Ordered, immutable set of questions
pub struct QuestionBank {
    entries: Vec<QuestionEntry>,
    random: Box<dyn RandomSource>,
}

impl QuestionBank {
    pub fn new(entries: Vec<QuestionEntry>, random: Box<dyn RandomSource>) -> Self {
        Self { entries, random }
    }

    /// Build from raw configured strings, skipping blank entries
    pub fn from_raw<S: AsRef<str>>(
        raw: &[S],
        delimiter: &str,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let entries = raw
            .iter()
            .enumerate()
            .filter_map(|(position, raw)| {
                let entry = QuestionEntry::parse(raw.as_ref(), delimiter);
                if entry.is_none() {
                    tracing::warn!(position, "Skipping blank question entry");
                }
                entry
            })
            .collect();

        Self::new(entries, random)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    /// Pick one entry uniformly at random
    pub fn pick_random(&self) -> QuizResult<&QuestionEntry> {
        if self.entries.is_empty() {
            return Err(QuizError::EmptyQuestionBank);
        }
        let index = self.random.index(self.entries.len()) % self.entries.len();
        Ok(&self.entries[index])
    }
}

impl std::fmt::Debug for QuestionBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionBank")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
