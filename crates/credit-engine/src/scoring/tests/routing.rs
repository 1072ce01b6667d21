use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    scoring_router_with_service(service)
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn post_score_returns_rich_payload() {
    let router = build_router();
    let payload = serde_json::to_value(submission()).expect("serialize submission");

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/score", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body.get("score"), Some(&json!(553)));
    assert_eq!(body.get("band"), Some(&json!("poor")));
    assert!(body.get("pd").and_then(Value::as_f64).is_some());
    assert!(body.get("reasons").and_then(Value::as_array).is_some());
}

#[tokio::test]
async fn post_score_rejects_out_of_range_fields() {
    let router = build_router();
    let mut payload = serde_json::to_value(submission()).expect("serialize submission");
    payload["financials"]["credit_utilization"] = json!(1.4);

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/score", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("credit_utilization"));
}

#[tokio::test]
async fn post_applications_returns_tracking_view() {
    let router = build_router();
    let payload = serde_json::to_value(submission()).expect("serialize submission");

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/applications", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = read_json_body(response).await;
    assert!(body.get("record_id").is_some());
    assert_eq!(body.get("status"), Some(&json!("received")));
    assert!(matches!(body.get("score"), None | Some(Value::Null)));
}

#[tokio::test]
async fn post_score_for_unknown_record_is_not_found() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/applications/scr-999999/score")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_application_returns_pending_view() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/applications/scr-missing")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body.get("record_id"), Some(&json!("scr-missing")));
    assert_eq!(body.get("status"), Some(&json!("received")));
    assert!(body
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("pending"));
}
