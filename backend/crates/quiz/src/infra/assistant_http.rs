//! HTTP Assistant Gateway
//!
//! Talks to an OpenAI-compatible chat completions endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::gateway::{AssistantError, AssistantGateway};
use crate::infra::secrets::AssistantSecrets;

/// Chat completions client
pub struct HttpAssistantGateway {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl HttpAssistantGateway {
    pub fn new(secrets: AssistantSecrets, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = platform::http::build_http_client(timeout)?;

        Ok(Self {
            client,
            url: completions_url(&secrets.endpoint),
            api_key: secrets.api_key,
            model: secrets.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl AssistantGateway for HttpAssistantGateway {
    async fn send_message(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling assistant");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: truncate(&body, 512),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssistantError::Connection(e.to_string()))?;

        parse_completion(&bytes)
    }
}

/// `{endpoint}/chat/completions`, tolerating a trailing slash
fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}

/// Extract the first choice's text from a completion body
pub fn parse_completion(body: &[u8]) -> Result<String, AssistantError> {
    let completion: ChatCompletionResponse = serde_json::from_slice(body)
        .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AssistantError::EmptyReply)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.example.com/v1"),
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://api.example.com/v1/"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_new_uses_configured_model() {
        let gateway = HttpAssistantGateway::new(
            AssistantSecrets {
                endpoint: "https://api.example.com/v1/".to_string(),
                api_key: "sk-test".to_string(),
                model: "quiz-grader".to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(gateway.model(), "quiz-grader");
        assert_eq!(gateway.url, "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_parse_first_choice() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"Correct!"}},{"message":{"content":"ignored"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Correct!");
    }

    #[test]
    fn test_parse_empty_choices() {
        let err = parse_completion(br#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyReply));

        let err = parse_completion(br#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyReply));

        let err = parse_completion(br#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyReply));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_completion(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, AssistantError::InvalidResponse(_)));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("ああああ", 2), "ああ");
        assert_eq!(truncate("ab", 10), "ab");
    }
}
