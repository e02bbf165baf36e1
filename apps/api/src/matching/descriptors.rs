//! Typed inputs and outputs of the match engine.
//!
//! Records reach the engine as loosely-shaped JSON (rows straight from the record
//! store or from a client). Every field deserializes leniently: a missing or
//! ill-typed value falls back to its neutral default instead of failing, so one
//! malformed record cannot abort a batch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The job requisition being matched against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDescriptor {
    pub id: String,
    pub title: String,
    pub required_skills: Vec<String>,
    pub min_experience: f64,
    /// `None` means no upper bound.
    pub max_experience: Option<f64>,
    pub location: Option<String>,
}

/// One candidate to be ranked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateDescriptor {
    pub id: String,
    pub full_name: String,
    pub skills: Vec<String>,
    pub total_experience: f64,
    pub location: Option<String>,
}

/// Score and explanation for one candidate. Produced fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate_id: String,
    pub candidate_name: String,
    /// 0 – 100
    pub match_score: u32,
    /// Ordered skills → experience → location; absent contributions are omitted.
    pub reasons: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Field-by-field parsing
//
// Each field is looked up under its snake_case key first, then its camelCase
// key. A record may carry both (a stored row merged with client fields), so
// this cannot go through serde's `alias`, which rejects that as a duplicate.
// ────────────────────────────────────────────────────────────────────────────

impl JobDescriptor {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            id: id_value(field(object, "id", "id")),
            title: text_value(field(object, "title", "title")),
            required_skills: skills_value(field(object, "required_skills", "requiredSkills")),
            min_experience: parse_years(field(object, "min_experience", "minExperience"))
                .unwrap_or(0.0),
            max_experience: parse_years(field(object, "max_experience", "maxExperience")),
            location: optional_text_value(field(object, "location", "location")),
        }
    }
}

impl CandidateDescriptor {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            id: id_value(field(object, "id", "id")),
            full_name: text_value(field(object, "full_name", "fullName")),
            skills: skills_value(field(object, "skills", "skills")),
            total_experience: parse_years(field(object, "total_experience", "totalExperience"))
                .unwrap_or(0.0),
            location: optional_text_value(field(object, "location", "location")),
        }
    }
}

impl<'de> Deserialize<'de> for JobDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_object(&Map::deserialize(deserializer)?))
    }
}

impl<'de> Deserialize<'de> for CandidateDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_object(&Map::deserialize(deserializer)?))
    }
}

/// First non-null value under `snake`, then `camel`.
fn field<'a>(object: &'a Map<String, Value>, snake: &str, camel: &str) -> &'a Value {
    [snake, camel]
        .into_iter()
        .filter_map(|key| object.get(key))
        .find(|value| !value.is_null())
        .unwrap_or(&Value::Null)
}

fn id_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn text_value(value: &Value) -> String {
    value.as_str().map(str::to_string).unwrap_or_default()
}

fn optional_text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Non-string entries and blank strings are dropped.
fn skills_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Accepts JSON numbers and numeric strings ("4", " 3.5 "). Negative or
/// non-finite values are rejected.
pub fn parse_years(value: &Value) -> Option<f64> {
    let years = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_years_text(s),
        _ => None,
    }?;
    (years.is_finite() && years >= 0.0).then_some(years)
}

pub fn parse_years_text(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|years| years.is_finite() && *years >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_from_store_row_shape() {
        let candidate: CandidateDescriptor = serde_json::from_value(json!({
            "id": "c-1",
            "full_name": "Ada Lovelace",
            "skills": ["Rust", "  ", "Go", 7],
            "total_experience": "4.5",
            "location": "London"
        }))
        .unwrap();

        assert_eq!(candidate.id, "c-1");
        assert_eq!(candidate.full_name, "Ada Lovelace");
        assert_eq!(candidate.skills, vec!["Rust".to_string(), "Go".to_string()]);
        assert_eq!(candidate.total_experience, 4.5);
        assert_eq!(candidate.location.as_deref(), Some("London"));
    }

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let candidate: CandidateDescriptor = serde_json::from_value(json!({
            "id": 42,
            "fullName": "Grace Hopper",
            "totalExperience": 12
        }))
        .unwrap();
        assert_eq!(candidate.id, "42");
        assert_eq!(candidate.full_name, "Grace Hopper");
        assert_eq!(candidate.total_experience, 12.0);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let candidate: CandidateDescriptor = serde_json::from_value(json!({
            "id": "c-2",
            "skills": null,
            "total_experience": "ten years",
            "location": null
        }))
        .unwrap();
        assert!(candidate.skills.is_empty());
        assert_eq!(candidate.total_experience, 0.0);
        assert!(candidate.location.is_none());
        assert!(candidate.full_name.is_empty());
    }

    #[test]
    fn test_job_max_experience_null_is_unbounded() {
        let job: JobDescriptor = serde_json::from_value(json!({
            "id": "j-1",
            "title": "Backend Engineer",
            "required_skills": ["Rust"],
            "min_experience": 2,
            "max_experience": null,
            "location": ""
        }))
        .unwrap();
        assert_eq!(job.min_experience, 2.0);
        assert!(job.max_experience.is_none());
        assert!(job.location.is_none());
    }

    #[test]
    fn test_candidate_with_both_key_forms_keeps_its_data() {
        let candidate: CandidateDescriptor = serde_json::from_value(json!({
            "id": "c-1",
            "full_name": "Ada",
            "fullName": "Ada L.",
            "skills": ["Rust"],
            "total_experience": "5",
            "totalExperience": 9,
            "location": "London"
        }))
        .unwrap();

        assert_eq!(candidate.id, "c-1");
        assert_eq!(candidate.full_name, "Ada");
        assert_eq!(candidate.skills, vec!["Rust".to_string()]);
        assert_eq!(candidate.total_experience, 5.0);
    }

    #[test]
    fn test_job_with_both_key_forms_parses() {
        let job: JobDescriptor = serde_json::from_value(json!({
            "id": 7,
            "title": "Backend Engineer",
            "required_skills": ["Rust", "SQL"],
            "requiredSkills": ["Go"],
            "min_experience": 3,
            "minExperience": 1,
            "max_experience": null,
            "maxExperience": 6
        }))
        .unwrap();

        assert_eq!(job.id, "7");
        assert_eq!(job.required_skills, vec!["Rust".to_string(), "SQL".to_string()]);
        assert_eq!(job.min_experience, 3.0);
        // null snake-case value falls through to the camelCase one
        assert_eq!(job.max_experience, Some(6.0));
    }

    #[test]
    fn test_negative_years_are_rejected() {
        assert_eq!(parse_years(&json!(-3)), None);
        assert_eq!(parse_years(&json!("-1")), None);
        assert_eq!(parse_years(&json!("7")), Some(7.0));
    }

    #[test]
    fn test_match_result_serializes_camel_case() {
        let result = MatchResult {
            candidate_id: "c-1".to_string(),
            candidate_name: "Ada".to_string(),
            match_score: 90,
            reasons: vec!["Location match".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["candidateId"], "c-1");
        assert_eq!(value["candidateName"], "Ada");
        assert_eq!(value["matchScore"], 90);
        assert_eq!(value["reasons"][0], "Location match");
    }
}
