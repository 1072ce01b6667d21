use super::super::domain::{ApplicantProfile, Reason};
use super::config::ScorecardConfig;

/// Walk the narrative rule set, rank triggered reasons by absolute
/// magnitude, and keep the top `max_reasons`. The sort is stable, so rules
/// with equal magnitude keep their configured order.
pub(crate) fn explain(profile: &ApplicantProfile, config: &ScorecardConfig) -> Vec<Reason> {
    let mut reasons: Vec<Reason> = config
        .reason_rules
        .iter()
        .filter(|rule| rule.trigger.fires(rule.metric.read(profile)))
        .map(|rule| Reason {
            code: rule.code.clone(),
            label: rule.label.clone(),
            direction: rule.direction(),
            magnitude: rule.magnitude,
        })
        .collect();

    reasons.sort_by(|a, b| b.magnitude.abs().total_cmp(&a.magnitude.abs()));
    reasons.truncate(config.max_reasons);
    reasons
}
