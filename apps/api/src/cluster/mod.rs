// Resume clustering engine.
// Two interchangeable strategies: model-backed (primary, when a credential is
// configured) and rule-based (deterministic fallback, no external calls).
// All LLM calls go through llm_client; no direct API calls here.

pub mod ai;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod rules;
