//! Candidate search — keyword, experience range, and skill filters over stored rows.

use serde::Deserialize;
use serde_json::Value;

use crate::models::candidate::CandidateRow;

pub const DEFAULT_MIN_YEARS: f64 = 0.0;
pub const DEFAULT_MAX_YEARS: f64 = 15.0;

/// Query string of `GET /api/v1/candidates/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    /// Comma-separated skill names.
    pub skills: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// Lowercased keyword, if any.
    pub keyword: Option<String>,
    pub min_years: f64,
    pub max_years: f64,
    /// Lowercased skills; a candidate needs at least one of them.
    pub skills: Vec<String>,
}

impl From<SearchQuery> for SearchFilter {
    fn from(query: SearchQuery) -> Self {
        SearchFilter {
            keyword: query
                .q
                .map(|q| q.trim().to_lowercase())
                .filter(|q| !q.is_empty()),
            min_years: query.min_experience.unwrap_or(DEFAULT_MIN_YEARS),
            max_years: query.max_experience.unwrap_or(DEFAULT_MAX_YEARS),
            skills: query
                .skills
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl SearchFilter {
    pub fn matches(&self, candidate: &CandidateRow) -> bool {
        if let Some(keyword) = &self.keyword {
            if !matches_keyword(candidate, keyword) {
                return false;
            }
        }

        let years = candidate.experience_years();
        if years < self.min_years || years > self.max_years {
            return false;
        }

        if !self.skills.is_empty() {
            let has_any = candidate
                .skills
                .iter()
                .flatten()
                .any(|s| self.skills.contains(&s.to_lowercase()));
            if !has_any {
                return false;
            }
        }

        true
    }
}

pub fn filter_candidates(candidates: Vec<CandidateRow>, filter: &SearchFilter) -> Vec<CandidateRow> {
    candidates.into_iter().filter(|c| filter.matches(c)).collect()
}

/// Name, any skill, or any employer / position held.
fn matches_keyword(candidate: &CandidateRow, keyword: &str) -> bool {
    if candidate.full_name.to_lowercase().contains(keyword) {
        return true;
    }
    if candidate
        .skills
        .iter()
        .flatten()
        .any(|s| s.to_lowercase().contains(keyword))
    {
        return true;
    }

    let Some(Value::Array(history)) = &candidate.employment_history else {
        return false;
    };
    history.iter().any(|entry| {
        ["company", "position", "title"].iter().any(|field| {
            entry
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| v.to_lowercase().contains(keyword))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn make_candidate(name: &str, skills: &[&str], years: Option<&str>, history: Option<Value>) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            location: None,
            total_experience: years.map(str::to_string),
            relevant_experience: None,
            skills: Some(skills.iter().map(|s| s.to_string()).collect()),
            education: None,
            employment_history: history,
            links: None,
            projects: None,
            resume_file_path: None,
            resume_file_name: None,
            parsed_resume_text: None,
            source: None,
            notes: None,
            stage: None,
            tags: None,
            current_salary: None,
            expected_salary: None,
            notice_period: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn filter(q: Option<&str>, skills: Option<&str>) -> SearchFilter {
        SearchFilter::from(SearchQuery {
            q: q.map(str::to_string),
            skills: skills.map(str::to_string),
            ..SearchQuery::default()
        })
    }

    #[test]
    fn test_query_defaults() {
        let filter = SearchFilter::from(SearchQuery::default());
        assert!(filter.keyword.is_none());
        assert_eq!(filter.min_years, 0.0);
        assert_eq!(filter.max_years, 15.0);
        assert!(filter.skills.is_empty());
    }

    #[test]
    fn test_keyword_matches_name_skill_or_employer() {
        let by_name = make_candidate("Priya Natarajan", &[], Some("3"), None);
        let by_skill = make_candidate("Bo", &["Kubernetes"], Some("3"), None);
        let by_company = make_candidate(
            "Lee",
            &[],
            Some("3"),
            Some(json!([{ "company": "Initech", "position": "Analyst" }])),
        );

        assert!(filter(Some("priya"), None).matches(&by_name));
        assert!(filter(Some("KUBE"), None).matches(&by_skill));
        assert!(filter(Some("initech"), None).matches(&by_company));
        assert!(filter(Some("analyst"), None).matches(&by_company));
        assert!(!filter(Some("initech"), None).matches(&by_name));
    }

    #[test]
    fn test_extracted_title_field_is_searched() {
        let candidate = make_candidate(
            "Kim",
            &[],
            Some("2"),
            Some(json!([{ "company": "Globex", "title": "Data Engineer" }])),
        );
        assert!(filter(Some("data eng"), None).matches(&candidate));
    }

    #[test]
    fn test_experience_range_is_inclusive() {
        let mut f = filter(None, None);
        f.min_years = 2.0;
        f.max_years = 5.0;
        assert!(f.matches(&make_candidate("A", &[], Some("2"), None)));
        assert!(f.matches(&make_candidate("B", &[], Some("5"), None)));
        assert!(!f.matches(&make_candidate("C", &[], Some("5.5"), None)));
        // unparseable experience counts as zero
        assert!(!f.matches(&make_candidate("D", &[], Some("lots"), None)));
    }

    #[test]
    fn test_skill_filter_needs_any_exact_match() {
        let f = filter(None, Some("Go, rust"));
        assert!(f.matches(&make_candidate("A", &["Rust"], None, None)));
        assert!(!f.matches(&make_candidate("B", &["Rustlang"], None, None)));
        assert!(!f.matches(&make_candidate("C", &[], None, None)));
    }

    #[test]
    fn test_filter_candidates_preserves_order() {
        let rows = vec![
            make_candidate("Ann", &["Rust"], Some("1"), None),
            make_candidate("Ben", &["Java"], Some("1"), None),
            make_candidate("Cal", &["Rust"], Some("40"), None),
            make_candidate("Dee", &["rust"], Some("9"), None),
        ];
        let names: Vec<_> = filter_candidates(rows, &filter(None, Some("rust")))
            .into_iter()
            .map(|c| c.full_name)
            .collect();
        assert_eq!(names, vec!["Ann", "Dee"]);
    }
}
