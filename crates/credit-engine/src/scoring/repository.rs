use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantIdentity, ApplicantProfile, LoanTerms, RecordId, ScoreRecordStatus, ScoreResult,
};

/// Repository record tying an applicant snapshot to its scoring outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub record_id: RecordId,
    pub applicant: ApplicantIdentity,
    pub profile: ApplicantProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanTerms>,
    pub status: ScoreRecordStatus,
    pub received_on: NaiveDate,
    pub result: Option<ScoreResult>,
}

impl ScoreRecord {
    pub fn summary(&self) -> String {
        match &self.result {
            Some(result) => format!(
                "scored {} ({} band, pd {:.1}%)",
                result.score,
                result.band.label(),
                result.probability_of_default * 100.0
            ),
            None => "pending scoring".to_string(),
        }
    }

    pub fn status_view(&self) -> ScoreStatusView {
        ScoreStatusView {
            record_id: self.record_id.clone(),
            status: self.status.label(),
            summary: self.summary(),
            score: self.result.as_ref().map(|result| result.score),
            band: self.result.as_ref().map(|result| result.band.label()),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait ScoreRepository: Send + Sync {
    fn insert(&self, record: ScoreRecord) -> Result<ScoreRecord, RepositoryError>;
    fn update(&self, record: ScoreRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<ScoreRecord>, RepositoryError>;
    fn history(&self, limit: usize) -> Result<Vec<ScoreRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook notifying the lender feed that a score is ready.
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: LenderNotice) -> Result<(), NoticeError>;
}

/// Notice payload so routes and tests can assert the integration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenderNotice {
    pub template: String,
    pub record_id: RecordId,
    pub details: BTreeMap<String, String>,
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a record's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreStatusView {
    pub record_id: RecordId,
    pub status: &'static str,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<&'static str>,
}
