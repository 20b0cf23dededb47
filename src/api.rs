use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::engine::KycMatcher;
use crate::logging::dev_log_comparison;
use crate::metrics;
use crate::recommend::Recommendation;
use crate::record::{NormalizedRecord, Record};
use crate::result::ComparisonResult;
use crate::samples::{self, SampleCase, SampleSummary};

pub const MISSING_FIELDS_MESSAGE: &str =
    "Please enter at least name or address information for both documents.";

/// Per-field input cap in characters. Fuzzy scoring is quadratic in length.
pub const MAX_FIELD_CHARS: usize = 1024;

#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<KycMatcher>,
}

impl AppState {
    pub fn new(matcher: KycMatcher) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(KycMatcher::default())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please enter at least name or address information for both documents.")]
    MissingNameOrAddress { warnings: Vec<String> },

    #[error("{field} of Document {document} is too long (max {limit} characters)")]
    FieldTooLong {
        field: &'static str,
        document: &'static str,
        limit: usize,
    },

    #[error("unknown sample: {0}")]
    UnknownSample(String),

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingNameOrAddress { .. } | ApiError::FieldTooLong { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::UnknownSample(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
        };
        let error = self.to_string();
        let warnings = match self {
            ApiError::MissingNameOrAddress { warnings } => warnings,
            _ => Vec::new(),
        };
        let body = ErrorBody { error, warnings };
        (status, Json(body)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/compare", post(compare))
        .route("/compare/raw", post(compare_raw))
        .route("/normalize", post(normalize))
        .route("/samples", get(list_samples))
        .route("/samples/{id}", get(get_sample))
        .route("/samples/{id}/compare", get(compare_sample))
        .merge(metrics::router::<AppState>())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct CompareReq {
    #[serde(default)]
    doc_a: Record,
    #[serde(default)]
    doc_b: Record,
}

/// Both documents as pasted JSON text.
#[derive(Deserialize)]
struct RawCompareReq {
    #[serde(default)]
    doc_a: String,
    #[serde(default)]
    doc_b: String,
}

#[derive(Serialize)]
struct CompareResp {
    result: ComparisonResult,
    recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
}

fn check_lengths(rec: &Record, document: &'static str) -> Result<(), ApiError> {
    let fields = [
        ("Name", rec.name()),
        ("Address", rec.address()),
        ("DOB", rec.dob()),
        ("Gender", rec.gender()),
        ("Company", rec.company()),
    ];
    match fields
        .into_iter()
        .find(|(_, v)| v.chars().count() > MAX_FIELD_CHARS)
    {
        Some((field, _)) => Err(ApiError::FieldTooLong {
            field,
            document,
            limit: MAX_FIELD_CHARS,
        }),
        None => Ok(()),
    }
}

/// Guarded comparison; `warnings` travel with both the success and the 422 body.
fn run_compare(
    state: &AppState,
    doc_a: &Record,
    doc_b: &Record,
    warnings: Option<Vec<String>>,
) -> Result<CompareResp, ApiError> {
    check_lengths(doc_a, "A")?;
    check_lengths(doc_b, "B")?;
    if !doc_a.has_name_or_address() || !doc_b.has_name_or_address() {
        metrics::record_rejection();
        return Err(ApiError::MissingNameOrAddress {
            warnings: warnings.unwrap_or_default(),
        });
    }
    let result = state.matcher.compare(doc_a, doc_b);
    metrics::record_comparison(&result);
    dev_log_comparison(doc_a, doc_b, &result);
    let recommendation = Recommendation::from_result(&result);
    Ok(CompareResp {
        result,
        recommendation,
        warnings,
    })
}

async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<CompareReq>, JsonRejection>,
) -> Result<Json<CompareResp>, ApiError> {
    let Json(body) = payload?;
    run_compare(&state, &body.doc_a, &body.doc_b, None).map(Json)
}

async fn compare_raw(
    State(state): State<AppState>,
    payload: Result<Json<RawCompareReq>, JsonRejection>,
) -> Result<Json<CompareResp>, ApiError> {
    let Json(body) = payload?;
    let mut warnings = Vec::new();
    let mut parse = |text: &str, label: &str| match Record::from_json_lenient(text) {
        Ok(rec) => rec,
        Err(e) => {
            debug!(target: "kyc", error = %e, document = label, "raw document rejected");
            warnings.push(format!("Invalid JSON format for Document {label}"));
            Record::default()
        }
    };
    let doc_a = parse(&body.doc_a, "A");
    let doc_b = parse(&body.doc_b, "B");

    run_compare(&state, &doc_a, &doc_b, Some(warnings)).map(Json)
}

async fn normalize(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<NormalizedRecord>, ApiError> {
    let Json(rec) = payload?;
    check_lengths(&rec, "A")?;
    Ok(Json(state.matcher.normalize(&rec)))
}

async fn list_samples() -> Json<Vec<SampleSummary<'static>>> {
    Json(samples::summaries())
}

fn sample(id: &str) -> Result<&'static SampleCase, ApiError> {
    samples::find(id).ok_or_else(|| ApiError::UnknownSample(id.to_string()))
}

async fn get_sample(Path(id): Path<String>) -> Result<Json<SampleCase>, ApiError> {
    sample(&id).cloned().map(Json)
}

async fn compare_sample(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompareResp>, ApiError> {
    let case = sample(&id)?;
    run_compare(&state, &case.doc_a, &case.doc_b, None).map(Json)
}
