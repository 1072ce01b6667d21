use super::super::domain::{ApplicantProfile, Band};
use super::config::ScorecardConfig;

pub(crate) fn compute_score(profile: &ApplicantProfile, config: &ScorecardConfig) -> u16 {
    let mut score = config.baseline;

    for adjustment in &config.linear_adjustments {
        score += adjustment.contribution(profile);
    }

    score += if profile.employment_years >= config.tenure.minimum_years {
        config.tenure.bonus
    } else {
        -config.tenure.penalty
    };

    score -= config.late_payment_penalty * f64::from(profile.late_payments_3m);

    score
        .round()
        .clamp(f64::from(config.score_floor), f64::from(config.score_ceiling)) as u16
}

pub(crate) fn band_for(score: u16, config: &ScorecardConfig) -> Band {
    let bands = &config.bands;
    if score >= bands.excellent {
        Band::Excellent
    } else if score >= bands.very_good {
        Band::VeryGood
    } else if score >= bands.good {
        Band::Good
    } else if score >= bands.fair {
        Band::Fair
    } else {
        Band::Poor
    }
}

pub(crate) fn probability_of_default(score: u16, config: &ScorecardConfig) -> f64 {
    let curve = &config.default_curve;
    let odds = 2f64.powf((f64::from(score) - curve.anchor_score) / curve.doubling_interval);
    (1.0 / (1.0 + odds)).clamp(curve.floor, curve.ceiling)
}
