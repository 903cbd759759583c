use async_trait::async_trait;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use super::Client;
use crate::{ClientError, Participant};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone)]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub(crate) fn user_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    pub(crate) fn into_text(self) -> Result<String, ClientError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(ClientError::EmptyReply {
                service: "Gemini",
                reason: match block_reason {
                    Some(reason) => format!("prompt was blocked ({reason})"),
                    None => "no candidates in response".to_string(),
                },
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(ClientError::EmptyReply {
                service: "Gemini",
                reason: format!(
                    "candidate has no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(text)
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
    pub(crate) async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = self
            .http
            .post(format!(
                "{}/models/{}:generateContent",
                self.api_base, self.model
            ))
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
                service: "Gemini",
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
        "Gemini"
    }

    async fn reply(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::user_prompt(prompt);
        let response = self.generate_content(request).await?;

        Ok(response.into_text()?)
    }
}
