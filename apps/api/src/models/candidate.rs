use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::descriptors::{parse_years_text, CandidateDescriptor};
use crate::models::nullable;

/// Hiring pipeline position of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Screening,
    Shortlisted,
    Interview,
    Offer,
    Rejected,
    Hired,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Screening,
        PipelineStage::Shortlisted,
        PipelineStage::Interview,
        PipelineStage::Offer,
        PipelineStage::Rejected,
        PipelineStage::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Screening => "screening",
            PipelineStage::Shortlisted => "shortlisted",
            PipelineStage::Interview => "interview",
            PipelineStage::Offer => "offer",
            PipelineStage::Rejected => "rejected",
            PipelineStage::Hired => "hired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Hired and rejected candidates have left the pipeline.
    pub fn is_active(&self) -> bool {
        !matches!(self, PipelineStage::Hired | PipelineStage::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Free text as extracted from the resume ("4", "3.5").
    pub total_experience: Option<String>,
    pub relevant_experience: Option<String>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Value>,
    pub employment_history: Option<Value>,
    pub links: Option<Value>,
    pub projects: Option<Value>,
    pub resume_file_path: Option<String>,
    pub resume_file_name: Option<String>,
    pub parsed_resume_text: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub stage: Option<String>,
    pub tags: Option<Vec<String>>,
    pub current_salary: Option<f64>,
    pub expected_salary: Option<f64>,
    pub notice_period: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    /// Years of experience; unparseable or missing text counts as zero.
    pub fn experience_years(&self) -> f64 {
        self.total_experience
            .as_deref()
            .and_then(parse_years_text)
            .unwrap_or(0.0)
    }

    pub fn pipeline_stage(&self) -> Option<PipelineStage> {
        self.stage.as_deref().and_then(PipelineStage::parse)
    }
}

/// Projection fetched for matching: id, name, skills, experience, location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateSummaryRow {
    pub id: Uuid,
    pub full_name: String,
    pub skills: Option<Vec<String>>,
    pub total_experience: Option<String>,
    pub location: Option<String>,
}

impl From<CandidateSummaryRow> for CandidateDescriptor {
    fn from(row: CandidateSummaryRow) -> Self {
        CandidateDescriptor {
            id: row.id.to_string(),
            full_name: row.full_name,
            skills: row
                .skills
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            total_experience: row
                .total_experience
                .as_deref()
                .and_then(parse_years_text)
                .unwrap_or(0.0),
            location: row.location.filter(|l| !l.trim().is_empty()),
        }
    }
}

/// Body of `POST /api/v1/candidates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCandidate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub total_experience: Option<String>,
    pub relevant_experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub education: Option<Value>,
    pub employment_history: Option<Value>,
    pub links: Option<Value>,
    pub projects: Option<Value>,
    pub resume_file_path: Option<String>,
    pub resume_file_name: Option<String>,
    pub parsed_resume_text: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub stage: Option<PipelineStage>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub current_salary: Option<f64>,
    pub expected_salary: Option<f64>,
    pub notice_period: Option<String>,
}

/// Body of `PATCH /api/v1/candidates/:id`. Absent fields are left unchanged;
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub relevant_experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub employment_history: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub links: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub projects: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub source: Option<Option<String>>,
    pub stage: Option<PipelineStage>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub current_salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub expected_salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notice_period: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trips_through_text() {
        for stage in PipelineStage::ALL {
            assert_eq!(PipelineStage::parse(stage.as_str()), Some(stage));
        }
        assert_eq!(PipelineStage::parse("archived"), None);
    }

    #[test]
    fn test_only_hired_and_rejected_are_inactive() {
        let inactive: Vec<_> = PipelineStage::ALL
            .into_iter()
            .filter(|s| !s.is_active())
            .collect();
        assert_eq!(inactive, vec![PipelineStage::Rejected, PipelineStage::Hired]);
    }

    #[test]
    fn test_update_null_clears_and_absent_keeps() {
        let update: CandidateUpdate = serde_json::from_value(serde_json::json!({
            "notes": null,
            "skills": ["Rust"],
            "stage": "interview"
        }))
        .unwrap();
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.skills, Some(Some(vec!["Rust".to_string()])));
        assert_eq!(update.stage, Some(PipelineStage::Interview));
        assert_eq!(update.phone, None);
        assert!(update.full_name.is_none());
    }

    #[test]
    fn test_summary_row_becomes_descriptor() {
        let id = Uuid::new_v4();
        let descriptor = CandidateDescriptor::from(CandidateSummaryRow {
            id,
            full_name: "Sam Okafor".to_string(),
            skills: Some(vec!["Rust".to_string(), " ".to_string()]),
            total_experience: Some("6.5 ".to_string()),
            location: Some("".to_string()),
        });
        assert_eq!(descriptor.id, id.to_string());
        assert_eq!(descriptor.skills, vec!["Rust".to_string()]);
        assert_eq!(descriptor.total_experience, 6.5);
        assert!(descriptor.location.is_none());
    }

    #[test]
    fn test_summary_row_with_missing_fields_defaults() {
        let descriptor = CandidateDescriptor::from(CandidateSummaryRow {
            id: Uuid::new_v4(),
            full_name: "No Data".to_string(),
            skills: None,
            total_experience: Some("about five".to_string()),
            location: None,
        });
        assert!(descriptor.skills.is_empty());
        assert_eq!(descriptor.total_experience, 0.0);
    }
}
