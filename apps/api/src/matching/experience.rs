//! Experience matcher — places a candidate's years of experience in the job's band.

/// Candidate inside [min, max] (or above min with no max).
pub const EXPERIENCE_IN_RANGE: f64 = 30.0;
/// Candidate above an explicit max.
pub const EXPERIENCE_ABOVE_RANGE: f64 = 20.0;
/// Candidate below min by at most `CLOSE_DEFICIT_YEARS`.
pub const EXPERIENCE_CLOSE: f64 = 15.0;
pub const CLOSE_DEFICIT_YEARS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExperienceBand {
    InRange,
    AboveRange,
    BelowClose { deficit: f64 },
    BelowFar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceMatch {
    pub band: ExperienceBand,
    /// 0.0 – 30.0
    pub sub_score: f64,
    pub reason: Option<String>,
}

pub fn classify_experience(candidate_years: f64, min_years: f64, max_years: Option<f64>) -> ExperienceBand {
    let meets_min = candidate_years >= min_years;
    let meets_max = max_years.map_or(true, |max| candidate_years <= max);

    if meets_min && meets_max {
        ExperienceBand::InRange
    } else if meets_min {
        ExperienceBand::AboveRange
    } else {
        let deficit = min_years - candidate_years;
        if deficit <= CLOSE_DEFICIT_YEARS {
            ExperienceBand::BelowClose { deficit }
        } else {
            ExperienceBand::BelowFar
        }
    }
}

pub fn match_experience(candidate_years: f64, min_years: f64, max_years: Option<f64>) -> ExperienceMatch {
    let band = classify_experience(candidate_years, min_years, max_years);

    let (sub_score, reason) = match band {
        ExperienceBand::InRange => (
            EXPERIENCE_IN_RANGE,
            Some(format!("{candidate_years} years experience meets requirements")),
        ),
        ExperienceBand::AboveRange => (
            EXPERIENCE_ABOVE_RANGE,
            Some("Exceeds experience range but qualified".to_string()),
        ),
        ExperienceBand::BelowClose { deficit } => (
            EXPERIENCE_CLOSE,
            Some(format!("{deficit} years below minimum, but close")),
        ),
        ExperienceBand::BelowFar => (0.0, None),
    };

    ExperienceMatch {
        band,
        sub_score,
        reason,
    }
}
