//! Clustering engine: dispatches one request to the model-backed strategy
//! when it is configured, and absorbs every failure of that strategy into the
//! rule-based fallback. Strategy unavailability is never a caller-visible
//! error; only invalid input (handler boundary) or a genuine bug is.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::cluster::ai::{ModelBackedStrategy, StrategyError};
use crate::cluster::models::{CandidateRecord, ClusteringResponse};
use crate::cluster::rules;
use crate::llm_client::LlmClient;

/// A clustering strategy. Implemented by the model-backed path; the
/// rule-based fallback stays a plain function so it is trivially pure and
/// doubles as the reference implementation in tests.
#[async_trait]
pub trait ClusterStrategy: Send + Sync {
    async fn cluster(
        &self,
        prompt: &str,
        records: &[CandidateRecord],
    ) -> Result<ClusteringResponse, StrategyError>;
}

/// The clustering engine held in `AppState`. Holds no cross-call state, so
/// concurrent requests are safe without coordination.
#[derive(Clone)]
pub struct ClusterEngine {
    primary: Option<Arc<dyn ClusterStrategy>>,
}

impl ClusterEngine {
    /// Builds the engine. A configured LLM client enables the model-backed
    /// primary strategy; without one every call goes straight to the rules.
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self {
            primary: llm.map(|client| {
                Arc::new(ModelBackedStrategy::new(client)) as Arc<dyn ClusterStrategy>
            }),
        }
    }

    /// Whether the model-backed strategy is configured.
    pub fn model_available(&self) -> bool {
        self.primary.is_some()
    }

    /// Clusters one candidate batch against one prompt.
    ///
    /// Infallible for valid input: any primary-strategy failure is logged and
    /// answered by the fallback. Input validation happens at the handler
    /// boundary before this is called.
    pub async fn cluster(
        &self,
        prompt: &str,
        records: &[CandidateRecord],
    ) -> ClusteringResponse {
        if let Some(primary) = &self.primary {
            match primary.cluster(prompt, records).await {
                Ok(response) => return response,
                Err(e) => warn!("model-backed clustering failed, falling back to rules: {e}"),
            }
        }
        rules::cluster(prompt, records)
    }
}
