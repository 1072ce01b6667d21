use super::super::domain::{ApplicantProfile, Direction};
use serde::{Deserialize, Serialize};

/// Profile measurement referenced by scorecard entries and reason rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    DebtToIncome,
    CreditUtilization,
    SavingsRate,
    EmploymentYears,
    LatePayments3m,
    BalanceVolatility,
}

impl Metric {
    pub fn read(self, profile: &ApplicantProfile) -> f64 {
        match self {
            Metric::DebtToIncome => profile.debt_to_income(),
            Metric::CreditUtilization => profile.credit_utilization,
            Metric::SavingsRate => profile.savings_rate,
            Metric::EmploymentYears => profile.employment_years,
            Metric::LatePayments3m => f64::from(profile.late_payments_3m),
            Metric::BalanceVolatility => profile.balance_volatility,
        }
    }
}

/// Linear scorecard entry. Contributes
/// `clamp((value - pivot) * slope, floor, cap)` so no single factor can
/// dominate; the asymmetric bounds encode greater downside risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearAdjustment {
    pub metric: Metric,
    pub pivot: f64,
    pub slope: f64,
    pub floor: f64,
    pub cap: f64,
}

impl LinearAdjustment {
    pub(crate) fn contribution(&self, profile: &ApplicantProfile) -> f64 {
        ((self.metric.read(profile) - self.pivot) * self.slope).clamp(self.floor, self.cap)
    }
}

/// Step bonus/penalty keyed on employment tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenureStep {
    pub minimum_years: f64,
    pub bonus: f64,
    pub penalty: f64,
}

/// Band lower bounds, inclusive. Scores below `fair` are Poor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub excellent: u16,
    pub very_good: u16,
    pub good: u16,
    pub fair: u16,
}

/// Parameters of the illustrative score-to-default-odds curve. Odds of
/// default halve every `doubling_interval` points above `anchor_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultCurve {
    pub anchor_score: f64,
    pub doubling_interval: f64,
    pub floor: f64,
    pub ceiling: f64,
}

/// Threshold test for a narrative reason rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Above(f64),
    AtLeast(f64),
    AtMost(f64),
}

impl Trigger {
    pub fn fires(self, value: f64) -> bool {
        match self {
            Trigger::Above(limit) => value > limit,
            Trigger::AtLeast(limit) => value >= limit,
            Trigger::AtMost(limit) => value <= limit,
        }
    }
}

/// Narrative rule emitting one ranked reason when its trigger fires.
///
/// Rule thresholds and magnitudes are deliberately independent of the
/// scorecard arithmetic: reasons are an illustrative rationale, not a signed
/// decomposition of the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonRule {
    pub code: String,
    pub label: String,
    pub metric: Metric,
    pub trigger: Trigger,
    pub magnitude: f64,
}

impl ReasonRule {
    pub fn direction(&self) -> Direction {
        if self.magnitude < 0.0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

/// Scoring policy expressed as data so it can be reviewed, versioned, and
/// loaded from a file independently of the HTTP glue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardConfig {
    pub baseline: f64,
    pub linear_adjustments: Vec<LinearAdjustment>,
    pub tenure: TenureStep,
    /// Deducted per late payment in the trailing three months. Unbounded
    /// downside: repeated delinquency should dominate every other factor.
    pub late_payment_penalty: f64,
    pub score_floor: u16,
    pub score_ceiling: u16,
    pub bands: BandThresholds,
    pub default_curve: DefaultCurve,
    pub reason_rules: Vec<ReasonRule>,
    pub max_reasons: usize,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            baseline: 660.0,
            linear_adjustments: vec![
                LinearAdjustment {
                    metric: Metric::DebtToIncome,
                    pivot: 0.35,
                    slope: -200.0,
                    floor: -80.0,
                    cap: 40.0,
                },
                LinearAdjustment {
                    metric: Metric::CreditUtilization,
                    pivot: 0.25,
                    slope: -150.0,
                    floor: -60.0,
                    cap: 30.0,
                },
                LinearAdjustment {
                    metric: Metric::SavingsRate,
                    pivot: 0.10,
                    slope: 120.0,
                    floor: -20.0,
                    cap: 20.0,
                },
            ],
            tenure: TenureStep {
                minimum_years: 2.0,
                bonus: 10.0,
                penalty: 10.0,
            },
            late_payment_penalty: 15.0,
            score_floor: 300,
            score_ceiling: 850,
            bands: BandThresholds {
                excellent: 800,
                very_good: 740,
                good: 670,
                fair: 580,
            },
            default_curve: DefaultCurve {
                anchor_score: 600.0,
                doubling_interval: 50.0,
                floor: 0.001,
                ceiling: 0.95,
            },
            reason_rules: default_reason_rules(),
            max_reasons: 5,
        }
    }
}

fn default_reason_rules() -> Vec<ReasonRule> {
    vec![
        rule("RC01", "High debt-to-income ratio", Metric::DebtToIncome, Trigger::Above(0.45), -25.0),
        rule("RC11", "High credit utilization", Metric::CreditUtilization, Trigger::Above(0.5), -18.0),
        rule("RC02", "Recent missed payments", Metric::LatePayments3m, Trigger::Above(0.0), -22.0),
        rule("RC05", "High balance fluctuation", Metric::BalanceVolatility, Trigger::Above(0.6), -10.0),
        rule("RC09", "Stable employment history", Metric::EmploymentYears, Trigger::AtLeast(2.0), 12.0),
        rule("RC10", "Healthy savings-to-income", Metric::SavingsRate, Trigger::AtLeast(0.15), 10.0),
        rule("RC15", "Low debt-to-income", Metric::DebtToIncome, Trigger::AtMost(0.30), 14.0),
        rule("RC16", "Low credit utilization", Metric::CreditUtilization, Trigger::AtMost(0.20), 8.0),
    ]
}

fn rule(code: &str, label: &str, metric: Metric, trigger: Trigger, magnitude: f64) -> ReasonRule {
    ReasonRule {
        code: code.to_string(),
        label: label.to_string(),
        metric,
        trigger,
        magnitude,
    }
}
