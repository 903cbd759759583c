use async_trait::async_trait;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use super::Client;
use crate::{ClientError, Participant};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Message {
    pub content: String,
    #[serde(default)]
    role: String,
}

#[derive(Serialize, Debug, Clone)]
pub(crate) struct CompletionRequest {
    messages: Vec<Message>,
    model: String,
}

impl CompletionRequest {
    pub(crate) fn user_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                content: prompt.to_string(),
                role: "user".to_string(),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct CompletionChoice {
    pub message: Message,
}

/// Only the fields the participant reads; servers differ on the rest.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub(crate) choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    pub(crate) fn into_text(self) -> Result<String, ClientError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ClientError::EmptyReply {
                service: "Llama",
                reason: "no choices in completion response".to_string(),
            })
    }
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

impl Client {
    pub(crate) async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .json(&request)
            .send()
            .await
            .into_diagnostic()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.into_diagnostic()?;
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            return Err(ClientError::Api {
                service: "Llama",
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let response_body = response.json().await.into_diagnostic()?;

        Ok(response_body)
    }
}

#[async_trait]
impl Participant for Client {
    fn name(&self) -> &str {
        "Llama"
    }

    async fn reply(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::user_prompt(&self.model, prompt);
        let response = self.completion(request).await?;

        Ok(response.into_text()?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::openai::Config;
    use crate::test_support::serve;

    type Seen = Arc<Mutex<Vec<Value>>>;

    #[test]
    fn request_wraps_prompt_as_single_user_message() {
        let request = CompletionRequest::user_prompt("llama3", "cats vs dogs");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3",
                "messages": [{ "role": "user", "content": "cats vs dogs" }],
            })
        );
    }

    #[test]
    fn reply_text_is_first_choice_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1718000000,
            "model": "llama3",
            "choices": [
                { "index": 0, "finish_reason": "stop",
                  "message": { "role": "assistant", "content": "Cats win." } },
                { "index": 1, "finish_reason": "stop",
                  "message": { "role": "assistant", "content": "Dogs win." } }
            ],
            "usage": { "prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5 }
        }"#;
        let response: CompletionResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.into_text().unwrap(), "Cats win.");
    }

    #[test]
    fn missing_choices_is_an_error() {
        let body = r#"{
            "id": "chatcmpl-2",
            "object": "chat.completion",
            "created": 1718000000,
            "model": "llama3",
            "choices": []
        }"#;
        let response: CompletionResponse = serde_json::from_str(body).unwrap();

        let err = response.into_text().unwrap_err();
        assert!(matches!(err, ClientError::EmptyReply { service: "Llama", .. }));
    }

    #[test]
    fn bare_response_without_metadata_parses() {
        let body = r#"{ "choices": [{ "message": { "content": "Cats win." } }] }"#;
        let response: CompletionResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.into_text().unwrap(), "Cats win.");
    }

    #[tokio::test]
    async fn reply_posts_prompt_to_chat_completions() {
        let seen = Seen::default();
        let router = Router::new()
            .route(
                "/v1/chat/completions",
                post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({
                        "choices": [{ "message": { "role": "assistant", "content": "Cats win." } }]
                    }))
                }),
            )
            .with_state(seen.clone());
        let base = serve(router);

        let client = Config::new(format!("{base}/v1/"), "llama3").client().unwrap();
        let reply = client.reply("cats vs dogs").await.unwrap();

        assert_eq!(reply, "Cats win.");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!({
                "model": "llama3",
                "messages": [{ "role": "user", "content": "cats vs dogs" }],
            })]
        );
    }

    #[tokio::test]
    async fn error_status_carries_provider_message() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    r#"{"error":{"message":"model is overloaded","type":"rate_limit"}}"#,
                )
            }),
        );
        let base = serve(router);

        let client = Config::new(format!("{base}/v1"), "llama3").client().unwrap();
        let err = client.reply("cats vs dogs").await.unwrap_err();

        assert_eq!(err.to_string(), "Llama API returned 429: model is overloaded");
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Api { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn non_json_error_body_is_passed_through() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
        );
        let base = serve(router);

        let client = Config::new(format!("{base}/v1"), "llama3").client().unwrap();
        let err = client.reply("cats vs dogs").await.unwrap_err();

        assert_eq!(err.to_string(), "Llama API returned 502: upstream unavailable");
    }
}
