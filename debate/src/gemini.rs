use miette::{Context, IntoDiagnostic, Result};
use reqwest::header::HeaderValue;

use crate::{ConfigError, APP_USER_AGENT};

pub(crate) mod generate;

pub const API_KEY_VAR: &str = "GOOGLE_GEMINI_API_KEY";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
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
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|var| std::env::var(var).ok())?)
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;

        let mut config = Self::new(api_key);
        if let Some(api_base) = lookup("GEMINI_API_BASE") {
            config.api_base = api_base;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    pub fn client(&self) -> Result<Client> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut value = HeaderValue::from_str(&self.api_key)
            .into_diagnostic()
            .wrap_err("Could not create header value")?;
        value.set_sensitive(true);

        headers.insert("x-goog-api-key", value);

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
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
