use super::domain::{ApplicantProfile, FinancialSnapshot, ScoreSubmission};

/// Validation errors raised before a submission reaches the engine.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be between 0 and 1")]
    OutOfUnitRange { field: &'static str },
}

/// Guard producing engine-ready profiles from raw form payloads.
///
/// The engine's contract requires pre-validated ranges; this is the single
/// place that enforces them. Non-finite values (a form coercion producing
/// NaN, for instance) are rejected here rather than propagated into a NaN
/// score.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeValidator;

impl IntakeValidator {
    pub fn profile_from_submission(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<ApplicantProfile, IntakeError> {
        self.profile_from_financials(&submission.financials)
    }

    pub fn profile_from_financials(
        &self,
        financials: &FinancialSnapshot,
    ) -> Result<ApplicantProfile, IntakeError> {
        let balance_volatility = match financials.balance_volatility {
            Some(value) => unit_interval("balance_volatility", value)?,
            None => 0.0,
        };

        Ok(ApplicantProfile {
            monthly_income: non_negative("monthly_income", financials.monthly_income)?,
            monthly_expenses: non_negative("monthly_expenses", financials.monthly_expenses)?,
            existing_debt: non_negative("existing_debt", financials.existing_debt)?,
            credit_utilization: unit_interval("credit_utilization", financials.credit_utilization)?,
            late_payments_3m: financials.late_payments_3m,
            employment_years: non_negative("employment_years", financials.employment_years)?,
            savings_rate: unit_interval("savings_rate", financials.savings_rate)?,
            balance_volatility,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, IntakeError> {
    if !value.is_finite() {
        return Err(IntakeError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(IntakeError::Negative { field });
    }
    Ok(value)
}

fn unit_interval(field: &'static str, value: f64) -> Result<f64, IntakeError> {
    if !value.is_finite() {
        return Err(IntakeError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(IntakeError::OutOfUnitRange { field });
    }
    Ok(value)
}
