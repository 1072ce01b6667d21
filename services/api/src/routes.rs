use crate::infra::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use credit_engine::scoring::{
    scoring_router, NoticePublisher, ScoreRecord, ScoreRepository, ScoringService,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// The original dashboard kept at most 50 records; same cap here.
const HISTORY_CAP: usize = 50;

pub(crate) fn with_scoring_routes<R, P>(service: Arc<ScoringService<R, P>>) -> axum::Router
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    let history = axum::Router::new()
        .route("/api/v1/history", axum::routing::get(history_endpoint::<R, P>))
        .with_state(service.clone());

    scoring_router(service)
        .merge(history)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub(crate) limit: usize,
}

fn default_history_limit() -> usize {
    HISTORY_CAP
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryEntry {
    pub(crate) record_id: String,
    pub(crate) applicant: String,
    pub(crate) received_on: NaiveDate,
    pub(crate) score: u16,
    pub(crate) band: &'static str,
    pub(crate) pd: f64,
}

fn history_entry(record: &ScoreRecord) -> Option<HistoryEntry> {
    record.result.as_ref().map(|result| HistoryEntry {
        record_id: record.record_id.0.clone(),
        applicant: record.applicant.full_name.clone(),
        received_on: record.received_on,
        score: result.score,
        band: result.band.label(),
        pd: result.probability_of_default,
    })
}

pub(crate) async fn history_endpoint<R, P>(
    State(service): State<Arc<ScoringService<R, P>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    match service.history(query.limit.min(HISTORY_CAP)) {
        Ok(records) => {
            let entries: Vec<HistoryEntry> = records.iter().filter_map(history_entry).collect();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
