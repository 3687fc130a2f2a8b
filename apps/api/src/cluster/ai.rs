//! Model-backed clustering strategy.
//!
//! Delegates grouping to the generative model behind `llm_client`, retrying
//! transient failures before the engine falls back to the rules. Response
//! text is decoded by an ordered chain of fallible parsers; a response none
//! of them can decode exhausts the attempt exactly like a transport error.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cluster::engine::ClusterStrategy;
use crate::cluster::models::{Candidate, CandidateRecord, ClusterGroup, ClusteringResponse};
use crate::cluster::prompts::build_cluster_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// Total attempts per clustering call, including the first.
pub const MAX_ATTEMPTS: u32 = 3;
/// Base retry delay; doubles on each subsequent attempt (2s, 4s).
pub const RETRY_BASE_DELAY_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model response was not parseable as clustering JSON")]
    UnparseableResponse,
}

/// The shape the model is instructed to return. Bookkeeping fields
/// (`totalCandidates`, `aiPowered`, `model`) are stamped by this strategy,
/// never trusted from the model.
#[derive(Debug, Deserialize)]
struct ModelPayload {
    groups: Vec<ClusterGroup>,
    #[serde(default)]
    summary: Option<String>,
}

/// Clustering via the external generative model.
#[derive(Clone)]
pub struct ModelBackedStrategy {
    client: LlmClient,
}

impl ModelBackedStrategy {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterStrategy for ModelBackedStrategy {
    /// Runs one clustering call against the model, retrying with exponential
    /// backoff. Attempts are independent and strictly sequential; no partial
    /// result carries over between them.
    async fn cluster(
        &self,
        prompt: &str,
        records: &[CandidateRecord],
    ) -> Result<ClusteringResponse, StrategyError> {
        let candidates: Vec<Candidate> =
            records.iter().map(CandidateRecord::normalized).collect();
        let request = build_cluster_prompt(prompt, &candidates);

        let mut last_error: Option<StrategyError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = retry_delay(attempt);
                warn!(
                    "clustering attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let text = match self.client.generate(&request, JSON_ONLY_SYSTEM).await {
                Ok(text) => text,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                }
            };

            match parse_cluster_payload(&text) {
                Some(payload) => {
                    debug!("model clustering succeeded on attempt {}", attempt + 1);
                    return Ok(assemble(payload, prompt, candidates.len(), self.client.model()));
                }
                None => {
                    warn!("model returned unparseable clustering output");
                    last_error = Some(StrategyError::UnparseableResponse);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or(StrategyError::UnparseableResponse))
    }
}

/// Delay before retry `attempt` (1-based): 2s, 4s, ...
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS * (1 << (attempt - 1)))
}

/// Builds the final response from a parsed model payload, stamping the
/// bookkeeping fields so the output invariants hold regardless of what the
/// model emitted for them.
fn assemble(
    payload: ModelPayload,
    prompt: &str,
    total_candidates: usize,
    model: &str,
) -> ClusteringResponse {
    let groups: Vec<ClusterGroup> = payload
        .groups
        .into_iter()
        .filter(|g| !g.candidates.is_empty())
        .collect();

    let summary = payload
        .summary
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "Grouped {} candidates into {} clusters for \"{}\"",
                total_candidates,
                groups.len(),
                prompt
            )
        });

    ClusteringResponse {
        groups,
        summary,
        total_candidates,
        ai_powered: true,
        model: model.to_string(),
    }
}

/// Ordered parse chain: direct JSON, then a fenced ```json block, then the
/// span between the first `{` and the last `}`. Each tier returns `None`
/// rather than erroring so the next tier gets its turn.
fn parse_cluster_payload(text: &str) -> Option<ModelPayload> {
    try_direct(text)
        .or_else(|| try_fenced(text))
        .or_else(|| try_brace_span(text))
}

fn try_direct(text: &str) -> Option<ModelPayload> {
    serde_json::from_str(text.trim()).ok()
}

fn try_fenced(text: &str) -> Option<ModelPayload> {
    let start = text
        .find("```json")
        .map(|i| i + "```json".len())
        .or_else(|| text.find("```").map(|i| i + "```".len()))?;
    let rest = &text[start..];
    let end = rest.find("```")?;
    serde_json::from_str(rest[..end].trim()).ok()
}

fn try_brace_span(text: &str) -> Option<ModelPayload> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
