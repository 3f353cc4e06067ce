//! Domain Services
//!
//! Pure domain logic for building the assistant prompt.

/// Compose the prompt sent to the assistant for one answer.
///
/// Output is stable for a given triple:
///
/// ```text
/// {instruction}
///
/// Question: {question}
/// Answer: {answer}
/// ```
pub fn compose_prompt(instruction: &str, question: &str, answer: &str) -> String {
    format!(
        "{}\n\nQuestion: {}\nAnswer: {}",
        instruction.trim(),
        question,
        answer
    )
}
