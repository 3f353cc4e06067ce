//! Request Validation
//!
//! Turns the nullable wire request into a use-case input, or rejects it.

use crate::error::{QuizError, QuizResult};

/// Validated input for submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAnswerInput {
    pub session_id: String,
    pub answer_text: String,
}

/// Validate an answer submission.
///
/// A missing answer is reported as `AtLeastOneNullParameter` even when the
/// session id is missing too; `MissingSessionId` means only the id is absent.
pub fn validate_submit_answer(
    text_message: Option<String>,
    session_id: Option<String>,
) -> QuizResult<SubmitAnswerInput> {
    let answer_text = text_message.ok_or(QuizError::AtLeastOneNullParameter)?;

    let session_id = session_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(QuizError::MissingSessionId)?;

    Ok(SubmitAnswerInput {
        session_id,
        answer_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_request_passes() {
        let input = validate_submit_answer(Some("4".into()), Some("abc".into())).unwrap();
        assert_eq!(input.answer_text, "4");
        assert_eq!(input.session_id, "abc");
    }

    #[test]
    fn test_missing_answer() {
        let err = validate_submit_answer(None, Some("abc".into())).unwrap_err();
        assert!(matches!(err, QuizError::AtLeastOneNullParameter));
    }

    #[test]
    fn test_missing_session_id() {
        let err = validate_submit_answer(Some("4".into()), None).unwrap_err();
        assert!(matches!(err, QuizError::MissingSessionId));

        let err = validate_submit_answer(Some("4".into()), Some("   ".into())).unwrap_err();
        assert!(matches!(err, QuizError::MissingSessionId));
    }

    #[test]
    fn test_both_missing_reports_null_parameter() {
        let err = validate_submit_answer(None, None).unwrap_err();
        assert!(matches!(err, QuizError::AtLeastOneNullParameter));
    }

    #[test]
    fn test_empty_answer_is_allowed() {
        assert!(validate_submit_answer(Some(String::new()), Some("abc".into())).is_ok());
    }
}
