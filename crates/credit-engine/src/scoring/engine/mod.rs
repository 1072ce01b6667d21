mod config;
mod rules;
mod scorecard;

pub use config::{
    BandThresholds, DefaultCurve, LinearAdjustment, Metric, ReasonRule, ScorecardConfig,
    TenureStep, Trigger,
};

use super::domain::{ApplicantProfile, Band, Reason, ScoreResult};

/// Stateless evaluator applying a scorecard policy to applicant profiles.
///
/// Every operation is a pure function of its inputs: no I/O, no randomness,
/// no mutable state. Identical profiles always yield identical results.
pub struct ScoringEngine {
    config: ScorecardConfig,
}

impl ScoringEngine {
    pub fn new(config: ScorecardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorecardConfig {
        &self.config
    }

    /// Baseline plus bounded additive adjustments, rounded and clamped to
    /// the configured score range.
    pub fn compute_score(&self, profile: &ApplicantProfile) -> u16 {
        scorecard::compute_score(profile, &self.config)
    }

    /// Ranked narrative reasons for a profile. Not a decomposition of
    /// [`Self::compute_score`]'s arithmetic; the rule set is a separate,
    /// illustrative rationale.
    pub fn explain(&self, profile: &ApplicantProfile) -> Vec<Reason> {
        rules::explain(profile, &self.config)
    }

    pub fn band_for(&self, score: u16) -> Band {
        scorecard::band_for(score, &self.config)
    }

    /// Modeled default likelihood for a score, from the fixed odds curve.
    pub fn probability_of_default(&self, score: u16) -> f64 {
        scorecard::probability_of_default(score, &self.config)
    }

    /// Full outcome: score, band, default probability, ranked reasons.
    pub fn evaluate(&self, profile: &ApplicantProfile) -> ScoreResult {
        let score = self.compute_score(profile);

        ScoreResult {
            score,
            band: self.band_for(score),
            probability_of_default: self.probability_of_default(score),
            reasons: self.explain(profile),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScorecardConfig::default())
    }
}
