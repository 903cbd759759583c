use miette::{Context, IntoDiagnostic, Result};

use crate::APP_USER_AGENT;

pub(crate) mod completion;

const DEFAULT_API_BASE: &str = "http://localhost:11434/v1";
const DEFAULT_MODEL: &str = "llama3";

/// Connection settings for the Llama participant.
///
/// The participant talks to any OpenAI-compatible `chat/completions` endpoint
/// (Ollama, llama.cpp, vLLM, ...) and needs no credential.
#[derive(Debug, Clone)]
pub struct Config {
    api_base: String,
    model: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_base: String,
    model: String,
}

impl Config {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    pub fn from_env() -> Self {
        let api_base =
            std::env::var("LLAMA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("LLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::new(api_base, model)
    }

    pub fn client(&self) -> Result<Client> {
        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build reqwest client")?;

        Ok(Client {
            http,
            api_base: self.api_base.trim_end_matches('/').to_string(),
            model: self.model.clone(),
        })
    }
}
