use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::scoring::{
    LenderNotice, NoticeError, NoticePublisher, RecordId, RepositoryError, ScorecardConfig,
    ScoreRecord, ScoreRecordStatus, ScoreRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreRepository {
    records: Arc<Mutex<HashMap<RecordId, ScoreRecord>>>,
}

impl ScoreRepository for InMemoryScoreRepository {
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
        if guard.contains_key(&record.record_id) {
            guard.insert(record.record_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct InMemoryNoticePublisher {
    events: Arc<Mutex<Vec<LenderNotice>>>,
}

impl NoticePublisher for InMemoryNoticePublisher {
    fn publish(&self, notice: LenderNotice) -> Result<(), NoticeError> {
        let mut guard = self.events.lock().expect("notice mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryNoticePublisher {
    pub(crate) fn events(&self) -> Vec<LenderNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

/// Resolve the scorecard: a JSON policy file when configured, otherwise the
/// built-in defaults.
pub(crate) fn load_scorecard(config: &AppConfig) -> Result<ScorecardConfig, AppError> {
    match &config.scorecard_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(AppError::Scorecard)
        }
        None => Ok(ScorecardConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_scorecard_defaults_without_path() {
        let config = AppConfig {
            environment: credit_engine::config::AppEnvironment::Test,
            server: credit_engine::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: credit_engine::config::TelemetryConfig {
                log_level: "info".to_string(),
            },
            scorecard_path: None,
        };

        let scorecard = load_scorecard(&config).expect("defaults load");
        assert_eq!(scorecard, ScorecardConfig::default());
    }

    #[test]
    fn load_scorecard_rejects_missing_file() {
        let config = AppConfig {
            environment: credit_engine::config::AppEnvironment::Test,
            server: credit_engine::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: credit_engine::config::TelemetryConfig {
                log_level: "info".to_string(),
            },
            scorecard_path: Some("./does-not-exist.json".into()),
        };

        match load_scorecard(&config) {
            Err(AppError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
