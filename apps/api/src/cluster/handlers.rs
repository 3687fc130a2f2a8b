//! Axum route handler for the Clustering API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::cluster::models::{CandidateRecord, ClusteringResponse};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub resumes: Vec<CandidateRecord>,
}

/// POST /api/v1/resumes/cluster
///
/// Validates the request, then hands it to the engine. Strategy failures are
/// absorbed inside the engine, so this handler returns 200 for any valid
/// input; 400 is reserved for a missing prompt or an empty candidate list.
pub async fn handle_cluster(
    State(state): State<AppState>,
    Json(request): Json<ClusterRequest>,
) -> Result<Json<ClusteringResponse>, AppError> {
    validate_request(&request)?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        candidates = request.resumes.len(),
        ai = state.engine.model_available(),
        "clustering request received"
    );

    let response = state.engine.cluster(&request.prompt, &request.resumes).await;

    info!(
        %request_id,
        groups = response.groups.len(),
        ai_powered = response.ai_powered,
        "clustering request complete"
    );

    Ok(Json(response))
}

/// Fail-fast precondition checks. No strategy runs for an invalid request.
fn validate_request(request: &ClusterRequest) -> Result<(), AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }
    if request.resumes.is_empty() {
        return Err(AppError::Validation("resumes cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str, resumes: &str) -> ClusterRequest {
        ClusterRequest {
            prompt: prompt.to_string(),
            resumes: serde_json::from_str(resumes).unwrap(),
        }
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        let req = request("", r#"[{"id": "r1"}]"#);
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_whitespace_prompt_is_rejected() {
        let req = request("   \n", r#"[{"id": "r1"}]"#);
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_resumes_are_rejected() {
        let req = request("group by experience", "[]");
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request("group by experience", r#"[{"id": "r1"}]"#);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_request_body_tolerates_missing_fields() {
        // A body with neither key still deserializes, then fails validation.
        let req: ClusterRequest = serde_json::from_str("{}").unwrap();
        assert!(validate_request(&req).is_err());
    }
}
