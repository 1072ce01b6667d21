use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{ApplicantIdentity, ApplicantProfile, FinancialSnapshot, ScoreResult};
use super::engine::ScoringEngine;
use super::intake::IntakeValidator;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read applicant export: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One successfully scored CSV row.
#[derive(Debug, Clone)]
pub struct BatchScoredRow {
    pub line: u64,
    pub applicant: ApplicantIdentity,
    pub profile: ApplicantProfile,
    pub result: ScoreResult,
}

/// One rejected CSV row with the reason it was skipped.
#[derive(Debug, Clone)]
pub struct BatchRejection {
    pub line: u64,
    pub reason: String,
}

/// Outcome of a bulk scoring run. Invalid rows are reported, not fatal.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub scored: Vec<BatchScoredRow>,
    pub rejected: Vec<BatchRejection>,
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    full_name: String,
    #[serde(default)]
    email: String,
    monthly_income: f64,
    monthly_expenses: f64,
    existing_debt: f64,
    credit_utilization: f64,
    late_payments_3m: u32,
    employment_years: f64,
    savings_rate: f64,
    #[serde(default)]
    balance_volatility: Option<f64>,
}

impl BatchRow {
    fn identity(&self) -> ApplicantIdentity {
        ApplicantIdentity {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }

    fn financials(&self) -> FinancialSnapshot {
        FinancialSnapshot {
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            existing_debt: self.existing_debt,
            credit_utilization: self.credit_utilization,
            late_payments_3m: self.late_payments_3m,
            employment_years: self.employment_years,
            savings_rate: self.savings_rate,
            balance_volatility: self.balance_volatility,
        }
    }
}

/// Bulk scorer for CSV exports of applicant rows.
pub struct BatchScorer;

impl BatchScorer {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &ScoringEngine,
    ) -> Result<BatchOutcome, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &ScoringEngine,
    ) -> Result<BatchOutcome, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let validator = IntakeValidator;
        let mut outcome = BatchOutcome::default();

        for (index, row) in csv_reader.deserialize::<BatchRow>().enumerate() {
            // Header occupies line 1.
            let line = index as u64 + 2;

            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    outcome.rejected.push(BatchRejection {
                        line,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            match validator.profile_from_financials(&row.financials()) {
                Ok(profile) => {
                    let result = engine.evaluate(&profile);
                    outcome.scored.push(BatchScoredRow {
                        line,
                        applicant: row.identity(),
                        profile,
                        result,
                    });
                }
                Err(err) => outcome.rejected.push(BatchRejection {
                    line,
                    reason: err.to_string(),
                }),
            }
        }

        Ok(outcome)
    }
}
