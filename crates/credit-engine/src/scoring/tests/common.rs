use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{
    ApplicantIdentity, ApplicantProfile, EmploymentMetadata, FinancialSnapshot, LoanTerms,
    RecordId, ScoreRecordStatus, ScoreSubmission,
};
use crate::scoring::engine::ScoringEngine;
use crate::scoring::repository::{
    LenderNotice, NoticeError, NoticePublisher, RepositoryError, ScoreRecord, ScoreRepository,
};
use crate::scoring::{scoring_router, ScorecardConfig, ScoringService};

/// The worked example from the scorecard documentation: lands at 553, Poor.
pub(super) fn reference_profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: 6000.0,
        monthly_expenses: 2000.0,
        existing_debt: 5000.0,
        credit_utilization: 0.35,
        late_payments_3m: 0,
        employment_years: 1.0,
        savings_rate: 0.08,
        balance_volatility: 0.3,
    }
}

pub(super) fn strong_profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: 9000.0,
        monthly_expenses: 1500.0,
        existing_debt: 600.0,
        credit_utilization: 0.15,
        late_payments_3m: 0,
        employment_years: 6.0,
        savings_rate: 0.2,
        balance_volatility: 0.1,
    }
}

/// Trips six narrative rules so truncation and ranking can be observed.
pub(super) fn stressed_profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: 3000.0,
        monthly_expenses: 1000.0,
        existing_debt: 1000.0,
        credit_utilization: 0.6,
        late_payments_3m: 2,
        employment_years: 5.0,
        savings_rate: 0.2,
        balance_volatility: 0.7,
    }
}

pub(super) fn financials_from(profile: &ApplicantProfile) -> FinancialSnapshot {
    FinancialSnapshot {
        monthly_income: profile.monthly_income,
        monthly_expenses: profile.monthly_expenses,
        existing_debt: profile.existing_debt,
        credit_utilization: profile.credit_utilization,
        late_payments_3m: profile.late_payments_3m,
        employment_years: profile.employment_years,
        savings_rate: profile.savings_rate,
        balance_volatility: Some(profile.balance_volatility),
    }
}

pub(super) fn submission() -> ScoreSubmission {
    ScoreSubmission {
        applicant: ApplicantIdentity {
            full_name: "Jordan Ellis".to_string(),
            email: "jordan.ellis@example.com".to_string(),
        },
        financials: financials_from(&reference_profile()),
        employment: Some(EmploymentMetadata {
            occupation: "Registered Nurse".to_string(),
            education: Some("Bachelor's".to_string()),
        }),
        loan: Some(LoanTerms {
            amount: 8000.0,
            term_months: 12,
            purpose: "Debt consolidation".to_string(),
        }),
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn build_service() -> (
    ScoringService<MemoryRepository, MemoryNotices>,
    Arc<MemoryRepository>,
    Arc<MemoryNotices>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notices = Arc::new(MemoryNotices::default());
    let service = ScoringService::new(
        repository.clone(),
        notices.clone(),
        ScorecardConfig::default(),
    );
    (service, repository, notices)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RecordId, ScoreRecord>>>,
}

impl ScoreRepository for MemoryRepository {
    fn insert(&self, record: ScoreRecord) -> Result<ScoreRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.record_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.record_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.record_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn history(&self, limit: usize) -> Result<Vec<ScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut scored: Vec<ScoreRecord> = guard
            .values()
            .filter(|record| record.status == ScoreRecordStatus::Scored)
            .cloned()
            .collect();
        scored.sort_by(|a, b| b.record_id.0.cmp(&a.record_id.0));
        scored.truncate(limit);
        Ok(scored)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotices {
    events: Arc<Mutex<Vec<LenderNotice>>>,
}

impl MemoryNotices {
    pub(super) fn events(&self) -> Vec<LenderNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

impl NoticePublisher for MemoryNotices {
    fn publish(&self, notice: LenderNotice) -> Result<(), NoticeError> {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) fn scoring_router_with_service(
    service: ScoringService<MemoryRepository, MemoryNotices>,
) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
