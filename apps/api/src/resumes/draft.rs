//! Best-effort structured candidate data extracted from a resume.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::candidate::{NewCandidate, PipelineStage};
use crate::resumes::storage::StoredResume;

pub const UPLOAD_SOURCE: &str = "upload";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeLink {
    pub link_name: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tools: Option<String>,
}

/// Every field is optional; the extractor returns null for anything it can't find.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDraft {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "experience_as_text")]
    pub total_experience: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<ResumeLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employment_history: Vec<EmploymentEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ResumeDraft {
    /// Builds the insert payload for a candidate created straight from an upload.
    pub fn into_new_candidate(self, stored: &StoredResume, resume_text: &str) -> NewCandidate {
        let full_name = self
            .full_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| stored.file_name.clone());

        NewCandidate {
            full_name,
            email: self.email.unwrap_or_default(),
            phone: self.phone,
            location: self.location,
            total_experience: self.total_experience,
            skills: self.skills,
            education: to_json(&self.education),
            employment_history: to_json(&self.employment_history),
            links: to_json(&self.links),
            projects: to_json(&self.projects),
            resume_file_path: Some(stored.path.clone()),
            resume_file_name: Some(stored.file_name.clone()),
            parsed_resume_text: Some(resume_text.to_string()).filter(|t| !t.is_empty()),
            source: Some(UPLOAD_SOURCE.to_string()),
            notes: self.summary,
            stage: Some(PipelineStage::Screening),
            ..NewCandidate::default()
        }
    }
}

fn to_json<T: Serialize>(items: &[T]) -> Option<Value> {
    if items.is_empty() {
        return None;
    }
    serde_json::to_value(items).ok()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Models answer "4.5", 4.5, or "4.5 years"; keep whatever text they give.
fn experience_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
