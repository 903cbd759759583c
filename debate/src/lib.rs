use async_trait::async_trait;
use miette::Result;

pub use crate::error::{ClientError, ConfigError};
pub use crate::exchange::{respond_prompt, Exchange, ExchangeResult};
pub use crate::gemini::{Client as GeminiClient, Config as GeminiConfig};
pub use crate::openai::{Client as LlamaClient, Config as LlamaConfig};

mod error;
mod exchange;
pub mod gemini;
pub mod openai;

#[cfg(test)]
mod test_support;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// One side of the debate: takes a prompt, produces a reply.
#[async_trait]
pub trait Participant: Send + Sync {
    fn name(&self) -> &str;

    async fn reply(&self, prompt: &str) -> Result<String>;
}

/// Builds the production exchange: Llama speaks first, Gemini answers.
///
/// Fails if the Gemini credential is missing, which callers treat as a
/// startup error.
pub fn exchange_from_env() -> Result<Exchange> {
    let gemini = GeminiConfig::from_env()?.client()?;
    let llama = LlamaConfig::from_env().client()?;

    Ok(Exchange::new(llama, gemini))
}
