use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{RecordId, ScoreSubmission};
use super::repository::{NoticePublisher, RepositoryError, ScoreRepository};
use super::service::{ScoringService, ScoringServiceError};

/// Router builder exposing HTTP endpoints for scoring and record intake.
pub fn scoring_router<R, P>(service: Arc<ScoringService<R, P>>) -> Router
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<R, P>))
        .route("/api/v1/applications", post(submit_handler::<R, P>))
        .route(
            "/api/v1/applications/:record_id/score",
            post(evaluate_handler::<R, P>),
        )
        .route(
            "/api/v1/applications/:record_id",
            get(status_handler::<R, P>),
        )
        .with_state(service)
}

/// Stateless scoring: validate, evaluate, return the full result. Nothing
/// is persisted.
pub(crate) async fn score_handler<R, P>(
    State(service): State<Arc<ScoringService<R, P>>>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    match service.score_once(&submission) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(ScoringServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<R, P>(
    State(service): State<Arc<ScoringService<R, P>>>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ScoringServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(ScoringServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "record already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, P>(
    State(service): State<Arc<ScoringService<R, P>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    let id = RecordId(record_id);
    match service.score(&id) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(ScoringServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "record not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, P>(
    State(service): State<Arc<ScoringService<R, P>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
    P: NoticePublisher + 'static,
{
    let id = RecordId(record_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScoringServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "record_id": id.0,
                "status": "received",
                "summary": "pending scoring",
                "score": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
