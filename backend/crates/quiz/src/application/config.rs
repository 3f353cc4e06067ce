//! Application Configuration
//!
//! Configuration for the quiz application layer.

use kernel::error::app_error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::domain::question_bank::{QuestionBank, RandomSource, ThreadRandom};

/// Longest session TTL a quiz file may ask for
pub const MAX_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Quiz application configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Instruction placed before every question/answer pair
    pub instruction: String,
    /// Raw question entries, `"{question}{delimiter}{metadata}"`
    pub questions: Vec<String>,
    /// Separator between question text and metadata
    pub question_delimiter: String,
    /// Session TTL
    pub session_ttl: Duration,
    /// How often expired sessions are swept
    pub sweep_interval: Duration,
    /// Upper bound for one device delivery attempt
    pub delivery_timeout: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            instruction: String::new(),
            questions: Vec::new(),
            question_delimiter: "|".to_string(),
            session_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            delivery_timeout: Duration::from_secs(5),
        }
    }
}

/// On-disk quiz file
///
/// ```json
/// {"instruction": "Grade the answer", "questions": ["2+2=? | 4"]}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizFile {
    instruction: String,
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    question_delimiter: Option<String>,
    #[serde(default)]
    session_ttl_secs: Option<u64>,
}

impl QuizConfig {
    /// Parse a quiz file's JSON content
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let file: QuizFile = serde_json::from_str(json)?;
        let defaults = Self::default();

        // a zero TTL would hand out sessions that are already expired
        if let Some(secs) = file
            .session_ttl_secs
            .filter(|secs| *secs == 0 || *secs > MAX_SESSION_TTL_SECS)
        {
            return Err(AppError::bad_request(
                "InvalidQuizFile",
                format!(
                    "sessionTtlSecs must be between 1 and {}, got {}",
                    MAX_SESSION_TTL_SECS, secs
                ),
            ));
        }

        Ok(Self {
            instruction: file.instruction,
            questions: file.questions,
            question_delimiter: file
                .question_delimiter
                .unwrap_or(defaults.question_delimiter.clone()),
            session_ttl: file
                .session_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            ..defaults
        })
    }

    /// Load a quiz file from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Question bank with the production RNG
    pub fn question_bank(&self) -> QuestionBank {
        self.question_bank_with(Box::new(ThreadRandom))
    }

    pub fn question_bank_with(&self, random: Box<dyn RandomSource>) -> QuestionBank {
        QuestionBank::from_raw(&self.questions, &self.question_delimiter, random)
    }
}
