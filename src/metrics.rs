use axum::{routing::get, Router};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::result::ComparisonResult;

pub const COMPARISONS_TOTAL: &str = "kyc_comparisons_total";
pub const PRECONDITION_REJECTIONS_TOTAL: &str = "kyc_precondition_rejections_total";
pub const OVERALL_CONFIDENCE: &str = "kyc_overall_confidence";

// A process can hold one global recorder; routers built later share it.
static HANDLE: Lazy<Option<PrometheusHandle>> = Lazy::new(|| {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "prometheus recorder not installed");
            None
        }
    }
});

/// Install the Prometheus recorder (idempotent) and return its handle.
pub fn init() -> Option<PrometheusHandle> {
    HANDLE.clone()
}

/// Counters and histogram for one finished comparison.
/// Without an installed recorder these are no-ops.
pub fn record_comparison(result: &ComparisonResult) {
    counter!(COMPARISONS_TOTAL, "category" => result.match_category.slug()).increment(1);
    histogram!(OVERALL_CONFIDENCE).record(result.overall_confidence);
}

pub fn record_rejection() {
    counter!(PRECONDITION_REJECTIONS_TOTAL).increment(1);
}

/// Returns a router exposing `/metrics` with the Prometheus exposition format.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let handle = init();
    Router::new().route(
        "/metrics",
        get(move || {
            let h = handle.clone();
            async move { h.map(|h| h.render()).unwrap_or_default() }
        }),
    )
}
