//! Prompt construction for the model-backed clustering strategy.
//! Cross-cutting fragments live in `llm_client::prompts`; this file owns the
//! clustering-specific template.

use serde_json::json;

use crate::cluster::models::Candidate;

/// Clustering prompt template. Replace `{user_prompt}` and `{candidates_json}`
/// before sending.
///
/// The output schema deliberately uses the short key `experience`; the parser
/// accepts it as an alias for `jobExperience`.
pub const CLUSTER_PROMPT_TEMPLATE: &str = r#"Group the following resume candidates according to this instruction:

{user_prompt}

CANDIDATES:
{candidates_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "groups": [
    {
      "name": "Short group label",
      "description": "One sentence explaining what unites this group",
      "candidates": [
        {
          "id": "copy the candidate id verbatim",
          "name": "...",
          "education": "...",
          "experience": "...",
          "skills": "...",
          "reason": "Why THIS candidate belongs in THIS group"
        }
      ]
    }
  ],
  "summary": "One or two sentences describing the overall grouping"
}

HARD RULES:
1. EVERY candidate entry MUST carry id, name, education, experience, skills, reason
2. Every input candidate appears in exactly one group
3. Copy id, name, education, experience, skills verbatim from the input
4. Do NOT invent candidates or groups with no members"#;

/// Renders the clustering prompt for one request attempt.
pub fn build_cluster_prompt(user_prompt: &str, candidates: &[Candidate]) -> String {
    let candidates_json: Vec<serde_json::Value> = candidates
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "education": c.education,
                "experience": c.job_experience,
                "skills": c.skills,
                "shortlistStatus": c.shortlist_status,
            })
        })
        .collect();

    CLUSTER_PROMPT_TEMPLATE
        .replace("{user_prompt}", user_prompt)
        .replace(
            "{candidates_json}",
            &serde_json::to_string_pretty(&candidates_json).unwrap_or_else(|_| "[]".to_string()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::models::CandidateRecord;

    #[test]
    fn test_prompt_embeds_instruction_and_candidates() {
        let record: CandidateRecord = serde_json::from_str(
            r#"{"id": "r42", "name": "Ada", "skills": "Rust, distributed systems"}"#,
        )
        .unwrap();
        let prompt = build_cluster_prompt("group by skill family", &[record.normalized()]);

        assert!(prompt.contains("group by skill family"));
        assert!(prompt.contains("\"id\": \"r42\""));
        assert!(prompt.contains("Rust, distributed systems"));
        // Absent fields are sent with their placeholders, not omitted.
        assert!(prompt.contains("Not specified"));
    }

    #[test]
    fn test_prompt_requires_per_candidate_reason() {
        let prompt = build_cluster_prompt("anything", &[]);
        assert!(prompt.contains("id, name, education, experience, skills, reason"));
    }
}
