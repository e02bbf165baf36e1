//! Location matcher — free-text location comparison with a remote fallback.

/// Either side contains the other.
pub const LOCATION_MATCH: f64 = 20.0;
/// No containment, but one side mentions "remote".
pub const LOCATION_REMOTE: f64 = 15.0;
/// Awarded when either side has no location.
pub const LOCATION_NEUTRAL_CREDIT: f64 = 10.0;

const REMOTE_MARKER: &str = "remote";

#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    /// 0.0 – 20.0
    pub sub_score: f64,
    pub reason: Option<String>,
}

pub fn match_location(candidate_location: Option<&str>, job_location: Option<&str>) -> LocationMatch {
    let (candidate, job) = match (non_blank(candidate_location), non_blank(job_location)) {
        (Some(c), Some(j)) => (c.to_lowercase(), j.to_lowercase()),
        _ => {
            return LocationMatch {
                sub_score: LOCATION_NEUTRAL_CREDIT,
                reason: None,
            }
        }
    };

    if candidate.contains(&job) || job.contains(&candidate) {
        LocationMatch {
            sub_score: LOCATION_MATCH,
            reason: Some("Location match".to_string()),
        }
    } else if job.contains(REMOTE_MARKER) || candidate.contains(REMOTE_MARKER) {
        LocationMatch {
            sub_score: LOCATION_REMOTE,
            reason: Some("Remote work possible".to_string()),
        }
    } else {
        LocationMatch {
            sub_score: 0.0,
            reason: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_contained_in_full_address() {
        let result = match_location(Some("Austin, TX"), Some("Austin"));
        assert_eq!(result.sub_score, 20.0);
        assert_eq!(result.reason.as_deref(), Some("Location match"));
    }

    #[test]
    fn test_comparison_ignores_case() {
        assert_eq!(match_location(Some("BERLIN"), Some("berlin")).sub_score, 20.0);
    }

    #[test]
    fn test_remote_job_gives_fallback_credit() {
        let result = match_location(Some("San Francisco, CA"), Some("Remote"));
        assert_eq!(result.sub_score, 15.0);
        assert_eq!(result.reason.as_deref(), Some("Remote work possible"));
    }

    #[test]
    fn test_remote_candidate_gives_fallback_credit() {
        assert_eq!(match_location(Some("Remote (EU)"), Some("Lisbon")).sub_score, 15.0);
    }

    #[test]
    fn test_containment_wins_over_remote() {
        let result = match_location(Some("Remote - Austin"), Some("Austin"));
        assert_eq!(result.sub_score, 20.0);
        assert_eq!(result.reason.as_deref(), Some("Location match"));
    }

    #[test]
    fn test_missing_location_is_neutral() {
        assert_eq!(match_location(Some("Austin"), None).sub_score, 10.0);
        assert_eq!(match_location(None, Some("Austin")).sub_score, 10.0);
        assert_eq!(match_location(Some("   "), Some("Austin")).sub_score, 10.0);
        assert!(match_location(None, None).reason.is_none());
    }

    #[test]
    fn test_unrelated_locations_score_zero() {
        let result = match_location(Some("Tokyo"), Some("Paris"));
        assert_eq!(result.sub_score, 0.0);
        assert!(result.reason.is_none());
    }
}
