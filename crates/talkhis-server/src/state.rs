//! Server state management.

use std::sync::Arc;

use talkhis_core::summarize::Summarizer;
use talkhis_core::traits::{Llm, LlmConfig};
use talkhis_extractors::ExtractionPipeline;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{ApiError, ApiResult};

/// Held for the duration of one extract or summarize operation.
pub type OperationGuard = OwnedSemaphorePermit;

/// Shared application state.
///
/// Only one operation runs at a time; a second submission is turned away
/// instead of queued.
#[derive(Clone)]
pub struct AppState {
    summarizer: Arc<Summarizer>,
    pipeline: Arc<ExtractionPipeline>,
    in_flight: Arc<Semaphore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(summarizer: Summarizer, pipeline: ExtractionPipeline) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
            pipeline: Arc::new(pipeline),
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Create with a provider and the default extractors.
    pub fn from_llm(llm: Arc<dyn Llm>, config: &LlmConfig) -> Self {
        Self::new(
            Summarizer::new(llm, config),
            ExtractionPipeline::with_defaults(),
        )
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    /// Claim the single operation slot, or fail with `BUSY`.
    pub fn begin(&self) -> ApiResult<OperationGuard> {
        self.in_flight
            .clone()
            .try_acquire_owned()
            .map_err(|_| ApiError::busy())
    }

    /// Whether an operation is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.available_permits() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use talkhis_core::error::TalkhisResult;
    use talkhis_core::traits::{GenerationOptions, LlmResponse};
    use talkhis_core::types::Message;

    struct EchoLlm;

    #[async_trait]
    impl Llm for EchoLlm {
        async fn generate(
            &self,
            _messages: &[Message],
            _options: Option<GenerationOptions>,
        ) -> TalkhisResult<LlmResponse> {
            Ok(LlmResponse::text("ok"))
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_single_operation_slot() {
        let state = AppState::from_llm(Arc::new(EchoLlm), &LlmConfig::default());
        assert!(!state.is_busy());

        let guard = state.begin().unwrap();
        assert!(state.is_busy());
        let second = state.begin();
        assert!(matches!(second, Err(ref e) if e.code == "BUSY"));

        drop(guard);
        assert!(!state.is_busy());
        assert!(state.begin().is_ok());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let state = AppState::from_llm(Arc::new(EchoLlm), &LlmConfig::default());
        let other = state.clone();
        let _guard = state.begin().unwrap();
        assert!(other.begin().is_err());
        assert_eq!(other.summarizer().model_name(), "echo");
    }
}
