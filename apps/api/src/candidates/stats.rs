//! Dashboard statistics over the candidate pool.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::candidate::{CandidateRow, PipelineStage};

const TOP_SKILLS: usize = 5;
const NEW_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_candidates: usize,
    pub new_this_week: usize,
    pub in_pipeline: usize,
    pub hired: usize,
    pub top_skills: Vec<SkillCount>,
    pub stage_breakdown: Vec<StageCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: PipelineStage,
    pub count: usize,
}

pub fn compute_dashboard_stats(candidates: &[CandidateRow], now: DateTime<Utc>) -> DashboardStats {
    let week_ago = now - Duration::days(NEW_WINDOW_DAYS);

    let new_this_week = candidates.iter().filter(|c| c.created_at >= week_ago).count();

    // A stage outside the known set is treated like no stage at all.
    let in_pipeline = candidates
        .iter()
        .filter(|c| c.pipeline_stage().is_some_and(|s| s.is_active()))
        .count();

    let hired = candidates
        .iter()
        .filter(|c| c.pipeline_stage() == Some(PipelineStage::Hired))
        .count();

    let mut skill_counts: HashMap<&str, usize> = HashMap::new();
    for skill in candidates.iter().flat_map(|c| c.skills.iter().flatten()) {
        *skill_counts.entry(skill.as_str()).or_default() += 1;
    }
    let mut top_skills: Vec<SkillCount> = skill_counts
        .into_iter()
        .map(|(skill, count)| SkillCount {
            skill: skill.to_string(),
            count,
        })
        .collect();
    top_skills.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
    top_skills.truncate(TOP_SKILLS);

    let stage_breakdown = PipelineStage::ALL
        .into_iter()
        .map(|stage| StageCount {
            stage,
            count: candidates
                .iter()
                .filter(|c| c.pipeline_stage().unwrap_or(PipelineStage::Screening) == stage)
                .count(),
        })
        .collect();

    DashboardStats {
        total_candidates: candidates.len(),
        new_this_week,
        in_pipeline,
        hired,
        top_skills,
        stage_breakdown,
    }
}
