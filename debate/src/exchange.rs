use std::sync::Arc;
use std::time::Instant;

use miette::{Context, Result};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::Participant;

/// Wraps a reply from the first participant before handing it to the second.
pub fn respond_prompt(message: &str) -> String {
    format!("Respond to the following message: '{message}'")
}

/// The four replies of one exchange, in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    pub first_reply: String,
    pub second_reply: String,
    pub first_final: String,
    pub second_final: String,
}

/// Runs the fixed first → second → first → second sequence.
///
/// Each prompt is the previous reply; prompts to the second participant are
/// wrapped with [`respond_prompt`]. The first failure aborts the exchange.
#[derive(Clone)]
pub struct Exchange {
    first: Arc<dyn Participant>,
    second: Arc<dyn Participant>,
}

impl Exchange {
    pub fn new(first: impl Participant + 'static, second: impl Participant + 'static) -> Self {
        Self {
            first: Arc::new(first),
            second: Arc::new(second),
        }
    }

    pub fn first(&self) -> &dyn Participant {
        self.first.as_ref()
    }

    pub fn second(&self) -> &dyn Participant {
        self.second.as_ref()
    }

    pub async fn run(&self, topic: &str) -> Result<ExchangeResult> {
        let span = info_span!(
            "exchange",
            id = %Uuid::new_v4(),
            first = self.first.name(),
            second = self.second.name(),
        );

        self.run_turns(topic).instrument(span).await
    }

    async fn run_turns(&self, topic: &str) -> Result<ExchangeResult> {
        let started = Instant::now();
        info!(topic, "Starting exchange");

        let first_reply = turn(1, self.first(), topic).await?;
        let second_reply = turn(2, self.second(), &respond_prompt(&first_reply)).await?;
        let first_final = turn(3, self.first(), &second_reply).await?;
        let second_final = turn(4, self.second(), &respond_prompt(&first_final)).await?;

        info!(elapsed = ?started.elapsed(), "Exchange complete");

        Ok(ExchangeResult {
            first_reply,
            second_reply,
            first_final,
            second_final,
        })
    }
}

async fn turn(number: u8, participant: &dyn Participant, prompt: &str) -> Result<String> {
    let started = Instant::now();

    let reply = participant
        .reply(prompt)
        .await
        .map_err(|err| {
            warn!(participant = participant.name(), turn = number, "Turn failed: {err}");
            err
        })
        .wrap_err_with(|| format!("{} failed on turn {number}", participant.name()))?;

    debug!(
        participant = participant.name(),
        turn = number,
        reply_len = reply.len(),
        "Turn took {:?}",
        started.elapsed()
    );

    Ok(reply)
}
