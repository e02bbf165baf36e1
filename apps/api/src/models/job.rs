use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::descriptors::JobDescriptor;
use crate::models::nullable;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobRow> for JobDescriptor {
    fn from(row: &JobRow) -> Self {
        JobDescriptor {
            id: row.id.to_string(),
            title: row.title.clone(),
            required_skills: row
                .required_skills
                .iter()
                .flatten()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            min_experience: row.min_experience.unwrap_or(0).max(0) as f64,
            max_experience: row.max_experience.filter(|m| *m >= 0).map(f64::from),
            location: row.location.clone().filter(|l| !l.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
        }
    }
}

/// Body of `POST /api/v1/jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub status: Option<String>,
}

/// Body of `PATCH /api/v1/jobs/:id`. Absent fields are left unchanged;
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub requirements: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub required_skills: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub min_experience: Option<Option<i32>>,
    /// `Some(None)` removes the cap.
    #[serde(default, deserialize_with = "nullable")]
    pub max_experience: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub employment_type: Option<Option<EmploymentType>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary_min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary_max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<String>>,
}
