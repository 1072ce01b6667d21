use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted score records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Raw form payload accepted at the HTTP boundary before validation.
///
/// Carries applicant identity, requested loan terms, and employment metadata
/// that the scoring engine itself never reads. Only `financials` feeds the
/// engine, and only after the intake validator has checked its ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub applicant: ApplicantIdentity,
    pub financials: FinancialSnapshot,
    #[serde(default)]
    pub employment: Option<EmploymentMetadata>,
    #[serde(default)]
    pub loan: Option<LoanTerms>,
}

/// Who submitted the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantIdentity {
    pub full_name: String,
    pub email: String,
}

/// Occupation and education context collected on the form. Kept for record
/// displays; not a scoring input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentMetadata {
    pub occupation: String,
    #[serde(default)]
    pub education: Option<String>,
}

/// Requested loan parameters attached to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub amount: f64,
    pub term_months: u32,
    #[serde(default)]
    pub purpose: String,
}

/// Unvalidated financial fields exactly as the form sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    pub credit_utilization: f64,
    pub late_payments_3m: u32,
    pub employment_years: f64,
    pub savings_rate: f64,
    #[serde(default)]
    pub balance_volatility: Option<f64>,
}

/// Normalized financial profile consumed by the scoring engine.
///
/// Ranges are enforced upstream by [`crate::scoring::IntakeValidator`]; the
/// engine only guards the documented zero-income edge case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    pub credit_utilization: f64,
    pub late_payments_3m: u32,
    pub employment_years: f64,
    pub savings_rate: f64,
    #[serde(default)]
    pub balance_volatility: f64,
}

impl ApplicantProfile {
    /// Debt-to-income ratio: (existing debt + monthly expenses) / income.
    /// Zero income is maximal risk, not a division error.
    pub fn debt_to_income(&self) -> f64 {
        if self.monthly_income > 0.0 {
            (self.existing_debt + self.monthly_expenses) / self.monthly_income
        } else {
            1.0
        }
    }
}

/// Discrete risk category derived from the numeric score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Band {
    pub const fn label(self) -> &'static str {
        match self {
            Band::Poor => "poor",
            Band::Fair => "fair",
            Band::Good => "good",
            Band::VeryGood => "very_good",
            Band::Excellent => "excellent",
        }
    }
}

/// Sign of a reason's contribution, serialized as `+` / `-` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

/// Labeled, signed explanatory factor accompanying a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub code: String,
    pub label: String,
    pub direction: Direction,
    pub magnitude: f64,
}

/// Complete scoring outcome, produced fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u16,
    pub band: Band,
    #[serde(rename = "pd")]
    pub probability_of_default: f64,
    pub reasons: Vec<Reason>,
}

/// Lifecycle of a persisted score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRecordStatus {
    Received,
    Scored,
}

impl ScoreRecordStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreRecordStatus::Received => "received",
            ScoreRecordStatus::Scored => "scored",
        }
    }
}
