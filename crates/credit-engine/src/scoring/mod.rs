//! Credit score intake, evaluation, and persistence scaffolding.
//!
//! The engine is a pure computation; everything stateful (records, lender
//! notices, HTTP glue) lives behind the repository and publisher traits so
//! collaborating services can supply their own implementations.

pub mod batch;
pub mod domain;
pub(crate) mod engine;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, BatchOutcome, BatchRejection, BatchScoredRow, BatchScorer};
pub use domain::{
    ApplicantIdentity, ApplicantProfile, Band, Direction, EmploymentMetadata, FinancialSnapshot,
    LoanTerms, Reason, RecordId, ScoreRecordStatus, ScoreResult, ScoreSubmission,
};
pub use engine::{
    BandThresholds, DefaultCurve, LinearAdjustment, Metric, ReasonRule, ScorecardConfig,
    ScoringEngine, TenureStep, Trigger,
};
pub use intake::{IntakeError, IntakeValidator};
pub use repository::{
    LenderNotice, NoticeError, NoticePublisher, RepositoryError, ScoreRecord, ScoreRepository,
    ScoreStatusView,
};
pub use router::scoring_router;
pub use service::{ScoringService, ScoringServiceError};
