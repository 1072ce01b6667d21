use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;

use super::domain::{RecordId, ScoreRecordStatus, ScoreResult, ScoreSubmission};
use super::engine::{ScorecardConfig, ScoringEngine};
use super::intake::{IntakeError, IntakeValidator};
use super::repository::{
    LenderNotice, NoticeError, NoticePublisher, RepositoryError, ScoreRecord, ScoreRepository,
};

/// Service composing the intake validator, repository, engine, and lender
/// notice publisher.
pub struct ScoringService<R, P> {
    validator: IntakeValidator,
    repository: Arc<R>,
    notices: Arc<P>,
    engine: Arc<ScoringEngine>,
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id() -> RecordId {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("scr-{id:06}"))
}

impl<R, P> ScoringService<R, P>
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    pub fn new(repository: Arc<R>, notices: Arc<P>, config: ScorecardConfig) -> Self {
        Self {
            validator: IntakeValidator,
            repository,
            notices,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate a submission and persist it for later scoring.
    pub fn submit(&self, submission: ScoreSubmission) -> Result<ScoreRecord, ScoringServiceError> {
        let profile = self.validator.profile_from_submission(&submission)?;

        let record = ScoreRecord {
            record_id: next_record_id(),
            applicant: submission.applicant,
            profile,
            loan: submission.loan,
            status: ScoreRecordStatus::Received,
            received_on: Local::now().date_naive(),
            result: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Score a stored record, persist the outcome, and notify the lender feed.
    pub fn score(&self, record_id: &RecordId) -> Result<ScoreResult, ScoringServiceError> {
        let mut record = self
            .repository
            .fetch(record_id)?
            .ok_or(RepositoryError::NotFound)?;

        let result = self.engine.evaluate(&record.profile);

        record.status = ScoreRecordStatus::Scored;
        record.result = Some(result.clone());
        self.repository.update(record)?;

        let mut details = BTreeMap::new();
        details.insert("score".to_string(), result.score.to_string());
        details.insert("band".to_string(), result.band.label().to_string());
        self.notices.publish(LenderNotice {
            template: "score_ready".to_string(),
            record_id: record_id.clone(),
            details,
        })?;

        Ok(result)
    }

    /// Score a submission without persisting anything.
    pub fn score_once(&self, submission: &ScoreSubmission) -> Result<ScoreResult, ScoringServiceError> {
        let profile = self.validator.profile_from_submission(submission)?;
        Ok(self.engine.evaluate(&profile))
    }

    /// Fetch a record and current status for API responses.
    pub fn get(&self, record_id: &RecordId) -> Result<ScoreRecord, ScoringServiceError> {
        let record = self
            .repository
            .fetch(record_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Most recently scored records, capped at `limit`.
    pub fn history(&self, limit: usize) -> Result<Vec<ScoreRecord>, ScoringServiceError> {
        Ok(self.repository.history(limit)?)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notice(#[from] NoticeError),
}
