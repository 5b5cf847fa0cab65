//! Session layer tying the machine, history, and tutor together
//!
//! All state transitions happen synchronously on one logical thread of
//! execution. The single asynchronous operation is the tutor request,
//! serialized by a semaphore of capacity 1: at most one request is in
//! flight, and an in-flight request always runs to completion or
//! failure (no cancellation).

use crate::history::{CalculationResult, History};
use crate::machine::{transition, CalcState, Event};
use crate::tutor::prompt::{build_explain_prompt, build_query_prompt};
use crate::tutor::TutorService;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Fixed user-facing message for any tutor service failure.
pub const SERVICE_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please check your connection.";

/// Fixed user-facing message for a blank reply.
pub const EMPTY_REPLY_MESSAGE: &str = "I couldn't generate an answer. Please try again.";

/// Reasons a tutor request is not dispatched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AskError {
    #[error("a tutor request is already in flight")]
    Busy,
    #[error("empty prompt")]
    EmptyPrompt,
    #[error("no calculations recorded yet")]
    NoHistory,
}

/// Calculator session: machine state, calculation history, and the tutor.
pub struct Session {
    state: CalcState,
    history: History,
    tutor: Arc<dyn TutorService>,
    gate: Semaphore,
}

impl Session {
    pub fn new(tutor: Arc<dyn TutorService>) -> Self {
        Self {
            state: CalcState::default(),
            history: History::new(),
            tutor,
            gate: Semaphore::new(1),
        }
    }

    pub fn state(&self) -> &CalcState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply one input event. Any completed calculation is stamped,
    /// recorded in the history, and returned.
    pub fn apply(&mut self, event: Event) -> Option<CalculationResult> {
        let outcome = transition(&self.state, event);
        self.state = outcome.state;

        let record = outcome.calculation.map(|calculation| CalculationResult {
            expression: calculation.expression,
            result: calculation.result,
            timestamp: Utc::now(),
        })?;
        tracing::debug!(
            expression = %record.expression,
            result = %record.result,
            "calculation completed"
        );
        self.history.record(record.clone());
        Some(record)
    }

    /// Apply a key from the input surface; unrecognized keys are ignored.
    pub fn press_key(&mut self, key: &str) -> Option<CalculationResult> {
        Event::from_key(key).and_then(|event| self.apply(event))
    }

    /// True while a tutor request is in flight.
    pub fn tutor_busy(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Ask the tutor a free-text question.
    pub async fn ask(&self, query: &str) -> Result<String, AskError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AskError::EmptyPrompt);
        }
        self.dispatch(build_query_prompt(trimmed)).await
    }

    /// Ask the tutor to explain the most recent calculation.
    pub async fn explain_last(&self) -> Result<String, AskError> {
        let record = self.history.latest().ok_or(AskError::NoHistory)?;
        let prompt = build_explain_prompt(record);
        self.dispatch(prompt).await
    }

    /// Send one prompt, holding the single-flight permit for the
    /// duration of the request.
    ///
    /// Service failures never escape: they are logged and converted to a
    /// fixed user-facing message.
    async fn dispatch(&self, prompt: String) -> Result<String, AskError> {
        let _permit = self.gate.try_acquire().map_err(|_| AskError::Busy)?;

        match self.tutor.explain(&prompt).await {
            Ok(text) if text.trim().is_empty() => Ok(EMPTY_REPLY_MESSAGE.to_string()),
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(kind = ?e.kind, error = %e.message, "tutor request failed");
                Ok(SERVICE_ERROR_MESSAGE.to_string())
            }
        }
    }
}
