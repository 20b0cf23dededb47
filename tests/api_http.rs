// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /compare (+ 422 precondition, 400 malformed body)
// - POST /compare/raw (lenient parsing, warnings)
// - POST /normalize
// - GET /samples, /samples/{id}, /samples/{id}/compare (+ 404)
// - GET /metrics

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use kyc_doc_matcher::api::{create_router, AppState, MAX_FIELD_CHARS, MISSING_FIELDS_MESSAGE};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses (embedded tables).
fn test_router() -> Router {
    create_router(AppState::default())
}

async fn send(req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, bytes)
}

async fn get_json(uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET");
    let (status, bytes) = send(req).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

async fn post_json(uri: &str, payload: &Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let (status, bytes) = send(req).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let (status, bytes) = send(req).await;
    assert_eq!(status, StatusCode::OK, "health should be 200");
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn api_compare_returns_result_and_recommendation() {
    let payload = json!({
        "doc_a": {"Name": "Kumar Rajeev", "DOB": "10/05/1978", "Gender": "Male"},
        "doc_b": {"Name": "Rajeev Kumar", "DOB": "10/05/1978", "Gender": "Male"}
    });
    let (status, v) = post_json("/compare", &payload).await;
    assert_eq!(status, StatusCode::OK);

    let scores = &v["result"]["detailed_scores"];
    assert_eq!(scores["name_similarity"], 95);
    assert_eq!(scores["address_similarity"], 0);
    assert_eq!(scores["dob_similarity"], 100);
    assert_eq!(scores["gender_match"], 100);
    // 68 * 0.7 for the missing address
    assert_eq!(v["result"]["overall_confidence"], json!(47.6));
    assert_eq!(v["result"]["match_category"], "Low-to-medium confidence match");
    assert_eq!(v["recommendation"]["kind"], "reject");
    assert!(v.get("warnings").is_none(), "plain compare carries no warnings");
}

#[tokio::test]
async fn api_compare_rejects_records_without_name_or_address() {
    let payload = json!({
        "doc_a": {"Name": "Anita Sharma"},
        "doc_b": {"DOB": "15/08/1985", "Gender": "Female"}
    });
    let (status, v) = post_json("/compare", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], MISSING_FIELDS_MESSAGE);
}

#[tokio::test]
async fn api_compare_rejects_oversized_fields() {
    let long = "a".repeat(MAX_FIELD_CHARS + 1);
    let payload = json!({
        "doc_a": {"Name": "Anita Sharma", "Address": "12 MG Road"},
        "doc_b": {"Name": "Anita Sharma", "Address": long}
    });
    let (status, v) = post_json("/compare", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        v["error"],
        format!("Address of Document B is too long (max {MAX_FIELD_CHARS} characters)")
    );

    // exactly at the cap is still compared
    let at_cap = "a".repeat(MAX_FIELD_CHARS);
    let payload = json!({
        "doc_a": {"Name": at_cap},
        "doc_b": {"Name": at_cap}
    });
    let (status, v) = post_json("/compare", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["result"]["detailed_scores"]["name_similarity"], 100);

    let raw = json!({
        "doc_a": json!({"DOB": "x".repeat(MAX_FIELD_CHARS + 1), "Name": "A"}).to_string(),
        "doc_b": r#"{"Name": "A"}"#
    });
    let (status, v) = post_json("/compare/raw", &raw).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        v["error"],
        format!("DOB of Document A is too long (max {MAX_FIELD_CHARS} characters)")
    );
}

#[tokio::test]
async fn api_compare_malformed_body_is_client_error() {
    let req = Request::builder()
        .method("POST")
        .uri("/compare")
        .header("content-type", "application/json")
        .body(Body::from("{\"doc_a\": "))
        .expect("build POST");
    let (status, bytes) = send(req).await;
    assert!(status.is_client_error(), "got {status}");
    let v: Json = serde_json::from_slice(&bytes).expect("json error body");
    assert!(v["error"].is_string());
}

#[tokio::test]
async fn api_compare_raw_accepts_loose_json() {
    let payload = json!({
        "doc_a": r#"{"name": "Anita Sharma", "dob": "15/08/1985", "gender": "Female", "age": 40}"#,
        "doc_b": r#"{"Name": "Anita R. Sharma", "DOB": "15/08/1985", "Gender": "Female"}"#
    });
    let (status, v) = post_json("/compare/raw", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["warnings"], json!([]));
    assert_eq!(v["result"]["detailed_scores"]["name_similarity"], 80);
    assert_eq!(v["result"]["caution_notes"], json!(["Middle name discrepancy detected"]));
}

#[tokio::test]
async fn api_compare_raw_invalid_json_warns_and_hits_precondition() {
    let payload = json!({
        "doc_a": r#"{"Name": "Anita Sharma"}"#,
        "doc_b": "{not json"
    });
    let (status, v) = post_json("/compare/raw", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], MISSING_FIELDS_MESSAGE);
    assert_eq!(v["warnings"], json!(["Invalid JSON format for Document B"]));
}

#[tokio::test]
async fn api_normalize_returns_canonical_forms() {
    let payload = json!({
        "Name": "Dr. A. K. Mehta",
        "Address": "12 MG Rd., Blr",
        "DOB": "March 2, 1970",
        "Gender": " MALE ",
        "Company": "Meta Platforms, Inc."
    });
    let (status, v) = post_json("/normalize", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        v,
        json!({
            "name": "a. k. mehta",
            "address": "12 mg road bangalore",
            "company": "facebook",
            "dob": "1970-03-02",
            "gender": "male"
        })
    );
}

#[tokio::test]
async fn api_samples_list_and_detail() {
    let (status, v) = get_json("/samples").await;
    assert_eq!(status, StatusCode::OK);
    let list = v.as_array().expect("array");
    assert_eq!(list.len(), 5);
    assert_eq!(list[0], json!({"id": "middle-name-variation", "title": "Case 1: Middle Name Variation"}));

    let (status, v) = get_json("/samples/conflicting-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["doc_b"]["Name"], "Sunil Sharma");
}

#[tokio::test]
async fn api_sample_compare_flags_caution() {
    let (status, v) = get_json("/samples/conflicting-data/compare").await;
    assert_eq!(status, StatusCode::OK);
    let category = v["result"]["match_category"].as_str().expect("category");
    assert!(category.to_lowercase().contains("caution"), "got {category}");
    assert_eq!(v["recommendation"]["kind"], "manual_review_caution");
}

#[tokio::test]
async fn api_unknown_sample_is_404() {
    let (status, v) = get_json("/samples/case-99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["error"], "unknown sample: case-99");

    let (status, _) = get_json("/samples/case-99/compare").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_metrics_exposes_comparison_series() {
    let (status, _) = get_json("/samples/swapped-name-order/compare").await;
    assert_eq!(status, StatusCode::OK);

    let req = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .expect("build GET /metrics");
    let (status, bytes) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("kyc_comparisons_total"), "metrics body:\n{text}");
    assert!(text.contains("kyc_overall_confidence"), "metrics body:\n{text}");
}
