//! KYC Document Matcher: binary entrypoint
//! Boots the Axum HTTP server with the match tables, tracing and metrics wired in.

use anyhow::Context;
use kyc_doc_matcher::api::{self, AppState};
use kyc_doc_matcher::engine::KycMatcher;
use kyc_doc_matcher::logging::init_tracing;
use kyc_doc_matcher::metrics;
use kyc_doc_matcher::tables::MatchTables;
use shuttle_axum::ShuttleAxum;
use tracing::info;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();
    metrics::init();

    let tables = MatchTables::from_env().context("loading match tables")?;
    info!(
        target: "kyc",
        abbreviations = tables.abbreviations.len(),
        alias_groups = tables.company_aliases.len(),
        "match tables loaded"
    );

    let state = AppState::new(KycMatcher::new(tables));
    let router = api::create_router(state);

    Ok(router.into())
}
