//! Skill matcher — overlap between a candidate's skills and a job's required skills.
//!
//! Comparison is case-insensitive. In the default `Loose` mode a required skill
//! counts as covered when either string contains the other, so "Java" is covered
//! by "JavaScript" and "C" by "C++". `Strict` mode only accepts equal names.

use serde::{Deserialize, Serialize};

/// Maximum contribution of the skills dimension.
pub const SKILL_WEIGHT: f64 = 50.0;
/// Awarded when the job lists no required skills.
pub const SKILL_NEUTRAL_CREDIT: f64 = 25.0;

/// How a required skill is compared against a candidate skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    /// Bidirectional substring containment.
    #[default]
    Loose,
    /// Case-insensitive equality.
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    /// Number of required skills covered by the candidate.
    pub matched: usize,
    /// Number of required skills on the job.
    pub required: usize,
    /// 0.0 – 50.0
    pub sub_score: f64,
    pub reason: Option<String>,
}

pub fn match_skills(
    candidate_skills: &[String],
    required_skills: &[String],
    mode: SkillMatchMode,
) -> SkillMatch {
    let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched = required_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|required| {
            candidate_lower
                .iter()
                .any(|candidate| skill_covers(candidate, required, mode))
        })
        .count();

    let required = required_skills.len();
    let sub_score = if required > 0 {
        (matched as f64 / required as f64) * SKILL_WEIGHT
    } else {
        SKILL_NEUTRAL_CREDIT
    };

    let reason = (matched > 0).then(|| format!("Matches {matched}/{required} required skills"));

    SkillMatch {
        matched,
        required,
        sub_score,
        reason,
    }
}

/// Both arguments must already be lowercased.
fn skill_covers(candidate: &str, required: &str, mode: SkillMatchMode) -> bool {
    match mode {
        SkillMatchMode::Loose => candidate.contains(required) || required.contains(candidate),
        SkillMatchMode::Strict => candidate == required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_overlap_scores_fifty() {
        let result = match_skills(
            &skills(&["React", "AWS", "Node.js"]),
            &skills(&["React", "AWS"]),
            SkillMatchMode::Loose,
        );
        assert_eq!(result.matched, 2);
        assert_eq!(result.sub_score, 50.0);
        assert_eq!(result.reason.as_deref(), Some("Matches 2/2 required skills"));
    }

    #[test]
    fn test_partial_overlap_is_proportional() {
        let result = match_skills(
            &skills(&["rust"]),
            &skills(&["Rust", "Kafka", "Postgres", "Go"]),
            SkillMatchMode::Loose,
        );
        assert_eq!(result.matched, 1);
        assert_eq!(result.required, 4);
        assert_eq!(result.sub_score, 12.5);
    }

    #[test]
    fn test_empty_requirements_give_neutral_credit() {
        let result = match_skills(&skills(&["Rust"]), &[], SkillMatchMode::Loose);
        assert_eq!(result.sub_score, 25.0);
        assert_eq!(result.matched, 0);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_empty_candidate_skills_match_nothing() {
        let result = match_skills(&[], &skills(&["Rust", "Go"]), SkillMatchMode::Loose);
        assert_eq!(result.matched, 0);
        assert_eq!(result.sub_score, 0.0);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_loose_mode_matches_containment_both_ways() {
        // required "Java" is inside candidate "JavaScript"
        let result = match_skills(&skills(&["JavaScript"]), &skills(&["Java"]), SkillMatchMode::Loose);
        assert_eq!(result.matched, 1);

        // candidate "SQL" is inside required "PostgreSQL"
        let result = match_skills(&skills(&["sql"]), &skills(&["PostgreSQL"]), SkillMatchMode::Loose);
        assert_eq!(result.matched, 1);
    }

    #[test]
    fn test_strict_mode_requires_equal_names() {
        let result = match_skills(
            &skills(&["JavaScript", "c++"]),
            &skills(&["Java", "C++"]),
            SkillMatchMode::Strict,
        );
        assert_eq!(result.matched, 1);
        assert_eq!(result.sub_score, 25.0);
    }

    #[test]
    fn test_duplicate_required_skills_count_separately() {
        let result = match_skills(
            &skills(&["aws"]),
            &skills(&["AWS", "aws", "GCP"]),
            SkillMatchMode::Loose,
        );
        assert_eq!(result.matched, 2);
        assert_eq!(result.reason.as_deref(), Some("Matches 2/3 required skills"));
    }
}
