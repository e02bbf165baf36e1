//! Match-scoring engine: ranks candidates against a job requisition.
//!
//! Three independent matchers (skills 0–50, experience 0–30, location 0–20) feed
//! the aggregator, which rounds the sum and sorts best-first. The engine is pure:
//! no storage access, no I/O.

pub mod aggregate;
pub mod descriptors;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod request;
pub mod skills;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid request: {0}")]
    InvalidInput(String),
}
