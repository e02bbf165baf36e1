//! Score aggregation — combines the three sub-scores per candidate and ranks the batch.
//!
//! Scoring of each candidate is independent. Batches at or above
//! `MatchConfig::parallel_threshold` are scored on the rayon pool; smaller ones
//! run inline. Both paths collect results in input order and then apply the
//! same stable sort, so the output is identical either way.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::matching::descriptors::{CandidateDescriptor, JobDescriptor, MatchResult};
use crate::matching::experience::match_experience;
use crate::matching::location::match_location;
use crate::matching::skills::{match_skills, SkillMatchMode};

pub const MAX_MATCH_SCORE: u32 = 100;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Tunables for a match run. Carried in `AppState` and derived from `Config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    pub skill_mode: SkillMatchMode,
    /// Candidate count at which scoring fans out across threads.
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            skill_mode: SkillMatchMode::Loose,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Scores every candidate against `job` and returns them best-first.
///
/// The output always has one entry per input candidate. Equal scores keep
/// their input order.
pub fn run_match(
    job: &JobDescriptor,
    candidates: &[CandidateDescriptor],
    config: &MatchConfig,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = if candidates.len() >= config.parallel_threshold {
        candidates
            .par_iter()
            .map(|candidate| score_candidate(job, candidate, config.skill_mode))
            .collect()
    } else {
        candidates
            .iter()
            .map(|candidate| score_candidate(job, candidate, config.skill_mode))
            .collect()
    };

    // sort_by is stable
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

pub fn score_candidate(
    job: &JobDescriptor,
    candidate: &CandidateDescriptor,
    skill_mode: SkillMatchMode,
) -> MatchResult {
    let skills = match_skills(&candidate.skills, &job.required_skills, skill_mode);
    let experience = match_experience(
        candidate.total_experience,
        job.min_experience,
        job.max_experience,
    );
    let location = match_location(candidate.location.as_deref(), job.location.as_deref());

    let total = skills.sub_score + experience.sub_score + location.sub_score;

    let reasons = [skills.reason, experience.reason, location.reason]
        .into_iter()
        .flatten()
        .collect();

    MatchResult {
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.full_name.clone(),
        match_score: round_score(total),
        reasons,
    }
}

fn round_score(total: f64) -> u32 {
    (total.round().clamp(0.0, MAX_MATCH_SCORE as f64)) as u32
}
