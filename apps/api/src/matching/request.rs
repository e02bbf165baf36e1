//! Match request/response boundary.
//!
//! Only two things are validated here: `job` must be an object and `candidates`
//! must be an array. Everything below that level is normalised by the lenient
//! descriptors rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::matching::aggregate::{run_match, MatchConfig};
use crate::matching::descriptors::{CandidateDescriptor, JobDescriptor, MatchResult};
use crate::matching::MatchError;

/// A validated `{ job, candidates }` payload.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub job: JobDescriptor,
    pub candidates: Vec<CandidateDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub success: bool,
    pub matches: Vec<MatchResult>,
}

impl MatchResponse {
    pub fn new(matches: Vec<MatchResult>) -> Self {
        Self {
            success: true,
            matches,
        }
    }
}

impl MatchRequest {
    pub fn from_value(payload: Value) -> Result<Self, MatchError> {
        let Value::Object(mut body) = payload else {
            return Err(invalid_input());
        };

        let job = match body.remove("job") {
            Some(Value::Object(job)) => JobDescriptor::from_object(&job),
            _ => return Err(invalid_input()),
        };

        let candidates = match body.remove("candidates") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| normalize_candidate(index, item))
                .collect(),
            _ => return Err(invalid_input()),
        };

        Ok(Self { job, candidates })
    }

    pub fn run(&self, config: &MatchConfig) -> Vec<MatchResult> {
        debug!(
            "Matching {} candidates for job: {}",
            self.candidates.len(),
            self.job.title
        );

        let matches = run_match(&self.job, &self.candidates, config);

        debug!(
            "Matched candidates. Top score: {}",
            matches.first().map_or(0, |m| m.match_score)
        );
        matches
    }
}

/// Validates a raw payload and runs the engine over it.
pub fn match_payload(payload: Value, config: &MatchConfig) -> Result<Vec<MatchResult>, MatchError> {
    Ok(MatchRequest::from_value(payload)?.run(config))
}

fn invalid_input() -> MatchError {
    MatchError::InvalidInput("job and candidates array required".to_string())
}

/// A candidate element that is not an object is scored as an empty record.
fn normalize_candidate(index: usize, item: Value) -> CandidateDescriptor {
    match item {
        Value::Object(candidate) => CandidateDescriptor::from_object(&candidate),
        other => {
            warn!("Candidate at index {index} is not an object ({other}); scoring with defaults");
            CandidateDescriptor::default()
        }
    }
}
