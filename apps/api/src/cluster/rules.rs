//! Rule-based fallback clustering.
//!
//! Pure function of its inputs: no I/O, no clock, no randomness. It is the
//! strategy of record whenever the model-backed path is unconfigured or has
//! exhausted its retries, and it must always produce a structurally valid
//! response for valid input.
//!
//! Rules are checked against the prompt in a fixed priority order; the first
//! match wins. Every rule partitions the candidates into mutually exclusive,
//! exhaustive buckets, so each candidate lands in exactly one group.

use crate::cluster::models::{Candidate, CandidateRecord, ClusterGroup, ClusteringResponse};

/// Strategy label reported in `model` for rule-based results.
pub const MOCK_MODEL: &str = "mock-enhanced";

/// Vocabulary of terms over-represented in machine-written resume text.
/// Match reporting preserves this order.
pub const AI_INDICATORS: [&str; 10] = [
    "leverage",
    "utilize",
    "spearheaded",
    "orchestrated",
    "synergize",
    "optimized",
    "streamlined",
    "enhanced",
    "revolutionized",
    "innovative",
];

/// Minimum count of distinct indicator terms before a resume is flagged as
/// potentially AI-generated. Inherited threshold; kept overridable here.
pub const AI_INDICATOR_THRESHOLD: usize = 3;

/// Experience descriptions longer than this many characters are "Mid Level"
/// when no senior-title keyword is present. Inherited threshold; kept
/// overridable here.
pub const MID_LEVEL_MIN_CHARS: usize = 50;

const SENIOR_KEYWORDS: [&str; 3] = ["senior", "lead", "manager"];
const ADVANCED_DEGREE_KEYWORDS: [&str; 3] = ["master", "mba", "phd"];

/// Clusters candidates with the keyword rules selected by the prompt.
pub fn cluster(prompt: &str, records: &[CandidateRecord]) -> ClusteringResponse {
    let candidates: Vec<Candidate> = records.iter().map(CandidateRecord::normalized).collect();
    let prompt_lower = prompt.to_lowercase();

    let groups = if prompt_lower.contains("ai-generated") || prompt_lower.contains("ai generated")
    {
        ai_detection_groups(&candidates)
    } else if prompt_lower.contains("experience") || prompt_lower.contains("year") {
        experience_groups(&candidates)
    } else if prompt_lower.contains("education") || prompt_lower.contains("degree") {
        education_groups(&candidates)
    } else {
        status_groups(&candidates)
    };

    let groups: Vec<ClusterGroup> = groups
        .into_iter()
        .filter(|g| !g.candidates.is_empty())
        .collect();

    ClusteringResponse {
        summary: format!(
            "Grouped {} candidates into {} clusters for \"{}\"",
            candidates.len(),
            groups.len(),
            prompt
        ),
        total_candidates: candidates.len(),
        ai_powered: false,
        model: MOCK_MODEL.to_string(),
        groups,
    }
}

fn group(name: &str, description: &str) -> ClusterGroup {
    ClusterGroup {
        name: name.to_string(),
        description: description.to_string(),
        candidates: Vec::new(),
    }
}

/// Rule 1: flag resumes whose text leans on machine-writing vocabulary.
fn ai_detection_groups(candidates: &[Candidate]) -> Vec<ClusterGroup> {
    let mut flagged = group(
        "Potential AI-Generated",
        "Resumes using several terms common in machine-written text",
    );
    let mut human = group(
        "Likely Human-Written",
        "Resumes without notable machine-writing vocabulary",
    );

    for candidate in candidates {
        let text = format!(
            "{} {} {} {}",
            candidate.education, candidate.skills, candidate.job_experience, candidate.name
        )
        .to_lowercase();

        let matched: Vec<&str> = AI_INDICATORS
            .iter()
            .copied()
            .filter(|term| text.contains(term))
            .collect();

        if matched.len() >= AI_INDICATOR_THRESHOLD {
            flagged.candidates.push(candidate.to_result(format!(
                "Uses {} AI-typical terms: {}",
                matched.len(),
                matched.join(", ")
            )));
        } else {
            human.candidates.push(candidate.to_result(
                "No significant AI-generated writing indicators".to_string(),
            ));
        }
    }

    vec![flagged, human]
}

/// Rule 2: bucket by seniority keywords, then by description length.
fn experience_groups(candidates: &[Candidate]) -> Vec<ClusterGroup> {
    let mut senior = group(
        "Senior Level",
        "Candidates whose experience mentions a senior-level title",
    );
    let mut mid = group(
        "Mid Level",
        "Candidates with a substantial experience description but no senior title",
    );
    let mut junior = group(
        "Junior Level",
        "Candidates with a brief experience description",
    );

    for candidate in candidates {
        let experience_lower = candidate.job_experience.to_lowercase();
        let matched: Vec<&str> = SENIOR_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| experience_lower.contains(kw))
            .collect();

        let chars = candidate.job_experience.chars().count();

        if !matched.is_empty() {
            senior.candidates.push(candidate.to_result(format!(
                "Experience mentions: {}",
                matched.join(", ")
            )));
        } else if chars > MID_LEVEL_MIN_CHARS {
            mid.candidates.push(candidate.to_result(format!(
                "Detailed experience description ({chars} characters), no senior title"
            )));
        } else {
            junior.candidates.push(candidate.to_result(format!(
                "Brief experience description ({chars} characters)"
            )));
        }
    }

    vec![senior, mid, junior]
}

/// Rule 3: bucket by degree keywords. Advanced degrees are checked first, so
/// a resume listing both a master's and a bachelor's lands in Advanced.
fn education_groups(candidates: &[Candidate]) -> Vec<ClusterGroup> {
    let mut advanced = group(
        "Advanced Degrees",
        "Candidates holding a master's, MBA, or PhD",
    );
    let mut bachelors = group(
        "Bachelor's Degrees",
        "Candidates with a bachelor-level degree",
    );
    let mut other = group(
        "Other Education",
        "Candidates without recognizable degree keywords",
    );

    for candidate in candidates {
        let education_lower = candidate.education.to_lowercase();
        let matched: Vec<&str> = ADVANCED_DEGREE_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| education_lower.contains(kw))
            .collect();

        if !matched.is_empty() {
            advanced.candidates.push(candidate.to_result(format!(
                "Education mentions: {}",
                matched.join(", ")
            )));
        } else if education_lower.contains("bachelor") || education_lower.contains("degree") {
            bachelors
                .candidates
                .push(candidate.to_result("Bachelor-level degree listed".to_string()));
        } else {
            other.candidates.push(
                candidate.to_result("No degree keywords found in education".to_string()),
            );
        }
    }

    vec![advanced, bachelors, other]
}

/// Rule 4 (default): split on shortlist status. Comparison is
/// case-insensitive; the rest of the pipeline stores statuses lowercased but
/// older rows carry mixed casing.
fn status_groups(candidates: &[Candidate]) -> Vec<ClusterGroup> {
    let mut shortlisted = group("Shortlisted", "Candidates already shortlisted");
    let mut pending = group("Pending Review", "Candidates awaiting a shortlist decision");

    for candidate in candidates {
        if candidate.shortlist_status.eq_ignore_ascii_case("shortlisted") {
            shortlisted.candidates.push(candidate.to_result(format!(
                "Shortlist status is \"{}\"",
                candidate.shortlist_status
            )));
        } else {
            pending.candidates.push(candidate.to_result(format!(
                "Shortlist status is \"{}\"",
                candidate.shortlist_status
            )));
        }
    }

    vec![shortlisted, pending]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CandidateRecord {
        CandidateRecord {
            id: id.to_string(),
            name: None,
            education: None,
            skills: None,
            job_experience: None,
            shortlist_status: None,
        }
    }

    fn record_with_experience(id: &str, experience: &str) -> CandidateRecord {
        CandidateRecord {
            job_experience: Some(experience.to_string()),
            ..record(id)
        }
    }

    /// Every candidate must appear in exactly one group.
    fn assert_partition(response: &ClusteringResponse, expected_ids: &[&str]) {
        let mut seen: Vec<&str> = response
            .groups
            .iter()
            .flat_map(|g| g.candidates.iter().map(|c| c.id.as_str()))
            .collect();
        seen.sort_unstable();
        let mut expected = expected_ids.to_vec();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_ai_detection_three_indicators_flagged_in_vocabulary_order() {
        let candidates = vec![CandidateRecord {
            skills: Some("leverage, utilize, synergize".to_string()),
            ..record("r1")
        }];
        let response = cluster("ai-generated detection", &candidates);

        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].name, "Potential AI-Generated");
        assert_eq!(
            response.groups[0].candidates[0].reason,
            "Uses 3 AI-typical terms: leverage, utilize, synergize"
        );
    }

    #[test]
    fn test_ai_detection_counts_distinct_terms_not_occurrences() {
        // "leverage" repeated three times is still one distinct indicator.
        let candidates = vec![CandidateRecord {
            skills: Some("leverage leverage leverage".to_string()),
            ..record("r1")
        }];
        let response = cluster("find ai generated resumes", &candidates);

        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].name, "Likely Human-Written");
    }

    #[test]
    fn test_ai_detection_scans_all_text_fields() {
        let candidates = vec![CandidateRecord {
            education: Some("Optimized curriculum".to_string()),
            skills: Some("streamlined delivery".to_string()),
            job_experience: Some("spearheaded a team".to_string()),
            ..record("r1")
        }];
        let response = cluster("ai-generated check", &candidates);

        assert_eq!(response.groups[0].name, "Potential AI-Generated");
        assert_eq!(
            response.groups[0].candidates[0].reason,
            "Uses 3 AI-typical terms: spearheaded, optimized, streamlined"
        );
    }

    #[test]
    fn test_ai_detection_omits_empty_groups() {
        let candidates = vec![record("r1"), record("r2")];
        let response = cluster("ai-generated scan", &candidates);

        // Nobody is flagged, so only the human group survives.
        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].name, "Likely Human-Written");
        assert_partition(&response, &["r1", "r2"]);
    }

    #[test]
    fn test_ai_detection_takes_priority_over_experience() {
        let candidates = vec![record_with_experience("r1", "Senior Engineer")];
        let response = cluster("detect ai-generated text by experience", &candidates);

        let names: Vec<&str> = response.groups.iter().map(|g| g.name.as_str()).collect();
        assert!(names.contains(&"Likely Human-Written"));
        assert!(!names.contains(&"Senior Level"));
    }

    #[test]
    fn test_experience_scenario_senior_and_empty() {
        let candidates = vec![
            record_with_experience("r1", "Senior Software Engineer, 8 years"),
            record_with_experience("r2", ""),
        ];
        let response = cluster("Group by years of experience", &candidates);

        assert_eq!(response.total_candidates, 2);
        assert_eq!(response.groups.len(), 2);

        let senior = &response.groups[0];
        assert_eq!(senior.name, "Senior Level");
        assert_eq!(senior.candidates[0].id, "r1");
        assert!(senior.candidates[0].reason.contains("senior"));

        let junior = &response.groups[1];
        assert_eq!(junior.name, "Junior Level");
        assert_eq!(junior.candidates[0].id, "r2");
        assert!(junior.candidates[0].reason.contains("0 characters"));
    }

    #[test]
    fn test_experience_boundary_exactly_50_chars_is_junior() {
        let text = "a".repeat(MID_LEVEL_MIN_CHARS);
        let candidates = vec![record_with_experience("r1", &text)];
        let response = cluster("sort by experience", &candidates);

        assert_eq!(response.groups[0].name, "Junior Level");
        assert!(response.groups[0].candidates[0]
            .reason
            .contains("50 characters"));
    }

    #[test]
    fn test_experience_51_chars_is_mid() {
        let text = "a".repeat(MID_LEVEL_MIN_CHARS + 1);
        let candidates = vec![record_with_experience("r1", &text)];
        let response = cluster("sort by experience", &candidates);

        assert_eq!(response.groups[0].name, "Mid Level");
        assert!(response.groups[0].candidates[0]
            .reason
            .contains("51 characters"));
    }

    #[test]
    fn test_experience_senior_keyword_beats_length() {
        let text = format!("Engineering manager. {}", "x".repeat(80));
        let candidates = vec![record_with_experience("r1", &text)];
        let response = cluster("cluster by years", &candidates);

        assert_eq!(response.groups[0].name, "Senior Level");
        assert_eq!(response.groups[0].candidates[0].reason, "Experience mentions: manager");
    }

    #[test]
    fn test_experience_partitions_all_candidates() {
        let candidates = vec![
            record_with_experience("r1", "Lead developer on a platform team"),
            record_with_experience("r2", &"b".repeat(120)),
            record_with_experience("r3", "intern"),
        ];
        let response = cluster("by years of experience", &candidates);

        assert_eq!(response.total_candidates, 3);
        assert_partition(&response, &["r1", "r2", "r3"]);
    }

    #[test]
    fn test_education_advanced_wins_over_bachelor() {
        let candidates = vec![CandidateRecord {
            education: Some("Bachelor of Science, Master of Engineering".to_string()),
            ..record("r1")
        }];
        let response = cluster("group by education", &candidates);

        assert_eq!(response.groups[0].name, "Advanced Degrees");
        assert_eq!(response.groups[0].candidates[0].reason, "Education mentions: master");
    }

    #[test]
    fn test_education_degree_without_master_is_bachelors() {
        let candidates = vec![CandidateRecord {
            education: Some("Associate degree in design".to_string()),
            ..record("r1")
        }];
        let response = cluster("split by degree", &candidates);

        assert_eq!(response.groups[0].name, "Bachelor's Degrees");
    }

    #[test]
    fn test_education_three_way_partition() {
        let candidates = vec![
            CandidateRecord {
                education: Some("PhD in Physics".to_string()),
                ..record("r1")
            },
            CandidateRecord {
                education: Some("Bachelor of Arts".to_string()),
                ..record("r2")
            },
            CandidateRecord {
                education: Some("Self-taught".to_string()),
                ..record("r3")
            },
        ];
        let response = cluster("group by education", &candidates);

        assert_eq!(response.groups.len(), 3);
        assert_eq!(response.groups[0].name, "Advanced Degrees");
        assert_eq!(response.groups[1].name, "Bachelor's Degrees");
        assert_eq!(response.groups[2].name, "Other Education");
        assert_partition(&response, &["r1", "r2", "r3"]);
    }

    #[test]
    fn test_default_rule_splits_on_shortlist_status() {
        let candidates = vec![
            CandidateRecord {
                shortlist_status: Some("shortlisted".to_string()),
                ..record("r1")
            },
            CandidateRecord {
                shortlist_status: Some("rejected".to_string()),
                ..record("r2")
            },
            record("r3"),
        ];
        let response = cluster("organize these resumes", &candidates);

        assert_eq!(response.groups.len(), 2);
        assert_eq!(response.groups[0].name, "Shortlisted");
        assert_eq!(response.groups[0].candidates[0].id, "r1");
        assert_eq!(response.groups[1].name, "Pending Review");
        assert_partition(&response, &["r1", "r2", "r3"]);
    }

    #[test]
    fn test_default_rule_status_comparison_ignores_case() {
        let candidates = vec![CandidateRecord {
            shortlist_status: Some("Shortlisted".to_string()),
            ..record("r1")
        }];
        let response = cluster("organize these resumes", &candidates);

        assert_eq!(response.groups[0].name, "Shortlisted");
        assert_eq!(
            response.groups[0].candidates[0].reason,
            "Shortlist status is \"Shortlisted\""
        );
    }

    #[test]
    fn test_cluster_is_idempotent() {
        let candidates = vec![
            record_with_experience("r1", "Senior architect"),
            record_with_experience("r2", "junior dev"),
        ];
        let first = cluster("by experience", &candidates);
        let second = cluster("by experience", &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_names_prompt_and_counts() {
        let candidates = vec![record("r1"), record("r2")];
        let response = cluster("organize", &candidates);

        assert_eq!(
            response.summary,
            "Grouped 2 candidates into 1 clusters for \"organize\""
        );
        assert_eq!(response.model, MOCK_MODEL);
        assert!(!response.ai_powered);
    }

    #[test]
    fn test_total_candidates_always_matches_input() {
        let candidates: Vec<CandidateRecord> =
            (0..7).map(|i| record(&format!("r{i}"))).collect();
        for prompt in [
            "ai-generated sweep",
            "by experience",
            "by education",
            "whatever",
        ] {
            let response = cluster(prompt, &candidates);
            assert_eq!(response.total_candidates, 7, "prompt: {prompt}");
        }
    }
}
