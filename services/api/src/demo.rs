use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use credit_engine::error::AppError;
use credit_engine::scoring::{
    ApplicantIdentity, BatchScorer, EmploymentMetadata, FinancialSnapshot, IntakeValidator,
    LoanTerms, Reason, ScorecardConfig, ScoreSubmission, ScoringEngine, ScoringService,
};

use crate::infra::{InMemoryNoticePublisher, InMemoryScoreRepository};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Applicant display name for the printout
    #[arg(long, default_value = "Unnamed applicant")]
    pub(crate) name: String,
    /// Gross monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Monthly expenses (housing plus other)
    #[arg(long)]
    pub(crate) expenses: f64,
    /// Existing debt balance
    #[arg(long)]
    pub(crate) debt: f64,
    /// Credit utilization, 0 to 1
    #[arg(long)]
    pub(crate) utilization: f64,
    /// Late payments in the trailing three months
    #[arg(long, default_value_t = 0)]
    pub(crate) late_payments: u32,
    /// Years in current employment
    #[arg(long, default_value_t = 0.0)]
    pub(crate) employment_years: f64,
    /// Savings rate, 0 to 1
    #[arg(long, default_value_t = 0.0)]
    pub(crate) savings_rate: f64,
    /// Balance volatility, 0 to 1 (defaults to 0)
    #[arg(long)]
    pub(crate) balance_volatility: Option<f64>,
    /// Optional JSON scorecard overriding the built-in policy
    #[arg(long)]
    pub(crate) scorecard: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of applicant rows
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Optional JSON scorecard overriding the built-in policy
    #[arg(long)]
    pub(crate) scorecard: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional JSON scorecard overriding the built-in policy
    #[arg(long)]
    pub(crate) scorecard: Option<PathBuf>,
}

fn scorecard_from(path: Option<&PathBuf>) -> Result<ScorecardConfig, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(AppError::Scorecard)
        }
        None => Ok(ScorecardConfig::default()),
    }
}

fn engine_from(scorecard: Option<&PathBuf>) -> Result<ScoringEngine, AppError> {
    Ok(ScoringEngine::new(scorecard_from(scorecard)?))
}

fn render_reasons(reasons: &[Reason]) {
    if reasons.is_empty() {
        println!("Reasons: none triggered");
        return;
    }

    println!("Reasons (ranked by impact):");
    for reason in reasons {
        let sign = match reason.direction {
            credit_engine::scoring::Direction::Positive => '+',
            credit_engine::scoring::Direction::Negative => '-',
        };
        println!(
            "  [{sign}] {} ({}, {:.0})",
            reason.label, reason.code, reason.magnitude
        );
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = engine_from(args.scorecard.as_ref())?;
    let validator = IntakeValidator;

    let financials = FinancialSnapshot {
        monthly_income: args.income,
        monthly_expenses: args.expenses,
        existing_debt: args.debt,
        credit_utilization: args.utilization,
        late_payments_3m: args.late_payments,
        employment_years: args.employment_years,
        savings_rate: args.savings_rate,
        balance_volatility: args.balance_volatility,
    };

    let profile = match validator.profile_from_financials(&financials) {
        Ok(profile) => profile,
        Err(err) => {
            println!("Submission rejected: {err}");
            return Ok(());
        }
    };

    let result = engine.evaluate(&profile);
    println!("Applicant: {}", args.name);
    println!("Debt-to-income: {:.2}", profile.debt_to_income());
    println!(
        "Score: {} ({} band) | default probability {:.1}%",
        result.score,
        result.band.label(),
        result.probability_of_default * 100.0
    );
    render_reasons(&result.reasons);

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = engine_from(args.scorecard.as_ref())?;
    let outcome = BatchScorer::from_path(&args.csv, &engine)?;

    println!(
        "Batch scoring: {} scored, {} rejected",
        outcome.scored.len(),
        outcome.rejected.len()
    );
    for row in &outcome.scored {
        println!(
            "  line {} | {} | score {} ({}) | pd {:.1}%",
            row.line,
            row.applicant.full_name,
            row.result.score,
            row.result.band.label(),
            row.result.probability_of_default * 100.0
        );
    }
    for rejection in &outcome.rejected {
        println!("  line {} rejected: {}", rejection.line, rejection.reason);
    }

    Ok(())
}

fn demo_submission() -> ScoreSubmission {
    ScoreSubmission {
        applicant: ApplicantIdentity {
            full_name: "Dana Whitfield".to_string(),
            email: "dana.whitfield@example.com".to_string(),
        },
        financials: FinancialSnapshot {
            monthly_income: 6000.0,
            monthly_expenses: 2000.0,
            existing_debt: 5000.0,
            credit_utilization: 0.35,
            late_payments_3m: 0,
            employment_years: 1.0,
            savings_rate: 0.08,
            balance_volatility: Some(0.3),
        },
        employment: Some(EmploymentMetadata {
            occupation: "Dental Hygienist".to_string(),
            education: Some("Associate's".to_string()),
        }),
        loan: Some(LoanTerms {
            amount: 8000.0,
            term_months: 12,
            purpose: "Vehicle repair".to_string(),
        }),
    }
}

fn strong_demo_submission() -> ScoreSubmission {
    let mut submission = demo_submission();
    submission.applicant = ApplicantIdentity {
        full_name: "Marcus Oyelaran".to_string(),
        email: "marcus.oyelaran@example.com".to_string(),
    };
    submission.financials = FinancialSnapshot {
        monthly_income: 9000.0,
        monthly_expenses: 1500.0,
        existing_debt: 600.0,
        credit_utilization: 0.15,
        late_payments_3m: 0,
        employment_years: 6.0,
        savings_rate: 0.2,
        balance_volatility: Some(0.1),
    };
    submission
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let scorecard = scorecard_from(args.scorecard.as_ref())?;

    let repository = Arc::new(InMemoryScoreRepository::default());
    let notices = Arc::new(InMemoryNoticePublisher::default());
    let service = Arc::new(ScoringService::new(
        repository,
        notices.clone(),
        scorecard,
    ));

    println!("Credit scoring demo");

    for submission in [demo_submission(), strong_demo_submission()] {
        let name = submission.applicant.full_name.clone();
        let record = match service.submit(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("- {name}: submission rejected: {err}");
                continue;
            }
        };
        println!(
            "- Received {} from {} on {} -> status {}",
            record.record_id.0,
            name,
            record.received_on,
            record.status.label()
        );

        match service.score(&record.record_id) {
            Ok(result) => {
                println!(
                    "  Score {} ({} band) | default probability {:.1}%",
                    result.score,
                    result.band.label(),
                    result.probability_of_default * 100.0
                );
                render_reasons(&result.reasons);
            }
            Err(err) => println!("  Scoring unavailable: {err}"),
        }
    }

    println!("\nScored history (most recent first)");
    match service.history(10) {
        Ok(records) => {
            for record in records {
                println!("- {}: {}", record.record_id.0, record.summary());
            }
        }
        Err(err) => println!("history unavailable: {err}"),
    }

    let events = notices.events();
    if events.is_empty() {
        println!("\nLender notices: none dispatched");
    } else {
        println!("\nLender notices:");
        for notice in events {
            println!(
                "- template={} -> {} ({})",
                notice.template,
                notice.record_id.0,
                notice
                    .details
                    .get("band")
                    .map(String::as_str)
                    .unwrap_or("unknown band")
            );
        }
    }

    Ok(())
}
