use super::common::*;
use crate::scoring::intake::{IntakeError, IntakeValidator};

#[test]
fn valid_financials_produce_a_profile() {
    let validator = IntakeValidator;
    let profile = validator
        .profile_from_financials(&financials_from(&reference_profile()))
        .expect("profile builds");

    assert_eq!(profile, reference_profile());
}

#[test]
fn missing_volatility_defaults_to_zero() {
    let validator = IntakeValidator;
    let mut financials = financials_from(&reference_profile());
    financials.balance_volatility = None;

    let profile = validator
        .profile_from_financials(&financials)
        .expect("profile builds");
    assert_eq!(profile.balance_volatility, 0.0);
}

#[test]
fn non_finite_income_is_rejected() {
    let validator = IntakeValidator;
    let mut financials = financials_from(&reference_profile());
    financials.monthly_income = f64::NAN;

    match validator.profile_from_financials(&financials) {
        Err(IntakeError::NotFinite { field }) => assert_eq!(field, "monthly_income"),
        other => panic!("expected non-finite rejection, got {other:?}"),
    }
}

#[test]
fn negative_debt_is_rejected() {
    let validator = IntakeValidator;
    let mut financials = financials_from(&reference_profile());
    financials.existing_debt = -1.0;

    match validator.profile_from_financials(&financials) {
        Err(IntakeError::Negative { field }) => assert_eq!(field, "existing_debt"),
        other => panic!("expected negative rejection, got {other:?}"),
    }
}

#[test]
fn utilization_above_one_is_rejected() {
    let validator = IntakeValidator;
    let mut financials = financials_from(&reference_profile());
    financials.credit_utilization = 1.4;

    match validator.profile_from_financials(&financials) {
        Err(IntakeError::OutOfUnitRange { field }) => assert_eq!(field, "credit_utilization"),
        other => panic!("expected unit-range rejection, got {other:?}"),
    }
}

#[test]
fn submission_validation_reads_financials_only() {
    let validator = IntakeValidator;
    let mut submission = submission();
    submission.employment = None;
    submission.loan = None;

    validator
        .profile_from_submission(&submission)
        .expect("metadata is not required for scoring");
}
