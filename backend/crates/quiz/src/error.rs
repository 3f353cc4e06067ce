//! Quiz Error Types
//!
//! This module provides quiz-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::gateway::AssistantError;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
///
/// Every variant is reported to the client as a structured body
/// `{errorTitle, errorMessage, errorTrace}`.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A required request field is null or missing
    #[error("Some parameters are null/missing.")]
    AtLeastOneNullParameter,

    /// The answer was sent without a session id
    #[error("The session id is null/missing. Start a quiz first.")]
    MissingSessionId,

    /// The request body is not valid JSON
    #[error("The request body could not be read: {0}")]
    MalformedRequestBody(String),

    /// Unknown or expired session
    #[error("There is no active question for this session. Start a new quiz.")]
    NoActiveQuestion,

    /// No questions configured
    #[error("No quiz questions are configured.")]
    EmptyQuestionBank,

    /// Assistant call failed
    #[error("The assistant is unavailable: {0}")]
    AssistantUnavailable(#[from] AssistantError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// Machine-readable error code (`errorTitle`)
    pub fn title(&self) -> &'static str {
        match self {
            QuizError::AtLeastOneNullParameter => "AtLeastOneNullParameter",
            QuizError::MissingSessionId => "MissingSessionId",
            QuizError::MalformedRequestBody(_) => "MalformedRequestBody",
            QuizError::NoActiveQuestion => "NoActiveQuestion",
            QuizError::EmptyQuestionBank => "EmptyQuestionBank",
            QuizError::AssistantUnavailable(_) => "AssistantUnavailable",
            QuizError::Internal(_) => "InternalError",
        }
    }

    /// Processing stage that raised the error (`errorTrace`)
    pub fn trace(&self) -> &'static str {
        match self {
            QuizError::AtLeastOneNullParameter
            | QuizError::MissingSessionId
            | QuizError::MalformedRequestBody(_) => "request_validation",
            QuizError::NoActiveQuestion => "session_lookup",
            QuizError::EmptyQuestionBank => "question_selection",
            QuizError::AssistantUnavailable(_) => "assistant_call",
            QuizError::Internal(_) => "internal",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuizError::AtLeastOneNullParameter
            | QuizError::MissingSessionId
            | QuizError::MalformedRequestBody(_)
            | QuizError::NoActiveQuestion
            | QuizError::EmptyQuestionBank => StatusCode::BAD_REQUEST,
            QuizError::AssistantUnavailable(_) => StatusCode::BAD_GATEWAY,
            QuizError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::AtLeastOneNullParameter
            | QuizError::MissingSessionId
            | QuizError::MalformedRequestBody(_)
            | QuizError::NoActiveQuestion
            | QuizError::EmptyQuestionBank => ErrorKind::BadRequest,
            QuizError::AssistantUnavailable(_) => ErrorKind::BadGateway,
            QuizError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.title(), self.to_string()).with_trace(self.trace())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuizError::AssistantUnavailable(e) => {
                tracing::warn!(error = %e, "Assistant call failed");
            }
            QuizError::EmptyQuestionBank => {
                tracing::error!("Quiz started with an empty question bank");
            }
            _ if self.kind().is_server_error() => {
                tracing::error!(title = self.title(), error = %self, "Quiz internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz request rejected");
            }
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
