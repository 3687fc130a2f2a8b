//! Data model for the clustering engine.
//!
//! All candidate fields are opaque free text. The engine never mutates input
//! records; it reads them and echoes selected fields into the output. Wire
//! casing is camelCase to match the frontend contract.

use serde::{Deserialize, Serialize};

/// Placeholder for an absent candidate name.
pub const DEFAULT_NAME: &str = "Unknown";
/// Placeholder for absent education / skills / experience text.
pub const DEFAULT_FIELD: &str = "Not specified";
/// Placeholder for an absent shortlist status.
pub const DEFAULT_STATUS: &str = "pending";

/// One resume record submitted for clustering, as received on the wire.
///
/// Absent fields are filled with placeholders by [`CandidateRecord::normalized`].
/// An explicitly empty string is NOT absent and is preserved as-is; the
/// length-based rules depend on that distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Opaque identifier, unique within one clustering call.
    pub id: String,
    pub name: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub job_experience: Option<String>,
    pub shortlist_status: Option<String>,
}

/// A candidate with absence placeholders applied. Internal to the engine;
/// both strategies operate on this shape.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub education: String,
    pub skills: String,
    pub job_experience: String,
    pub shortlist_status: String,
}

impl CandidateRecord {
    /// Applies the placeholder defaults for fields the caller omitted.
    pub fn normalized(&self) -> Candidate {
        Candidate {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string()),
            education: self
                .education
                .clone()
                .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            skills: self
                .skills
                .clone()
                .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            job_experience: self
                .job_experience
                .clone()
                .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            shortlist_status: self
                .shortlist_status
                .clone()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        }
    }
}

impl Candidate {
    /// Echoes this candidate into an output entry with a group-specific reason.
    pub fn to_result(&self, reason: String) -> CandidateResult {
        CandidateResult {
            id: self.id.clone(),
            name: self.name.clone(),
            education: self.education.clone(),
            job_experience: self.job_experience.clone(),
            skills: self.skills.clone(),
            reason,
        }
    }
}

/// One candidate inside a cluster group, with the reason it was included.
///
/// The model-facing schema uses the short key `experience`; it is accepted as
/// an alias so model output parses into the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub id: String,
    pub name: String,
    pub education: String,
    #[serde(alias = "experience")]
    pub job_experience: String,
    pub skills: String,
    pub reason: String,
}

/// A named, justified subset of the input candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterGroup {
    pub name: String,
    pub description: String,
    pub candidates: Vec<CandidateResult>,
}

/// Overall result of one clustering call. Groups keep production order and
/// empty groups are omitted before assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringResponse {
    pub groups: Vec<ClusterGroup>,
    pub summary: String,
    pub total_candidates: usize,
    pub ai_powered: bool,
    pub model: String,
}
