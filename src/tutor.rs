//! Tutor service abstraction
//!
//! Provides a common interface for asking a hosted generative-language
//! model for math explanations.

mod error;
mod gemini;
pub mod prompt;

pub use error::{TutorError, TutorErrorKind};
pub use gemini::{GeminiTutor, TutorConfig, DEFAULT_TUTOR_MODEL};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for tutor backends.
///
/// One prompt in, one explanation out. Implementations do not retry,
/// and the session layer never has more than one request in flight.
#[async_trait]
pub trait TutorService: Send + Sync {
    /// Ask for an explanation of a single text prompt.
    async fn explain(&self, prompt: &str) -> Result<String, TutorError>;

    /// Get the model ID.
    fn model_id(&self) -> &str;
}

/// Logging wrapper for tutor services
pub struct LoggingTutor {
    inner: Arc<dyn TutorService>,
    model_id: String,
}

impl LoggingTutor {
    pub fn new(inner: Arc<dyn TutorService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl TutorService for LoggingTutor {
    async fn explain(&self, prompt: &str) -> Result<String, TutorError> {
        let start = std::time::Instant::now();
        let result = self.inner.explain(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    reply_chars = text.len(),
                    "tutor request completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "tutor request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTutor;

    #[async_trait]
    impl TutorService for CannedTutor {
        async fn explain(&self, prompt: &str) -> Result<String, TutorError> {
            if prompt.is_empty() {
                Err(TutorError::invalid_request("empty prompt"))
            } else {
                Ok(format!("about: {prompt}"))
            }
        }

        fn model_id(&self) -> &str {
            "canned-tutor"
        }
    }

    #[tokio::test]
    async fn logging_wrapper_passes_results_through() {
        let tutor = LoggingTutor::new(Arc::new(CannedTutor));
        assert_eq!(tutor.model_id(), "canned-tutor");

        let reply = tutor.explain("why is 2 + 2 = 4?").await.unwrap();
        assert_eq!(reply, "about: why is 2 + 2 = 4?");

        let err = tutor.explain("").await.unwrap_err();
        assert_eq!(err.kind, TutorErrorKind::InvalidRequest);
    }
}
