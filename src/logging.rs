// src/logging.rs
//! Tracing setup and PII-safe comparison logging.
//!
//! Raw names, addresses and dates are never logged. Comparison events carry a
//! short SHA-256 fingerprint of both records instead.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::record::Record;
use crate::result::ComparisonResult;

pub const ENV_DEV_LOG: &str = "KYC_DEV_LOG";
const DEFAULT_FILTER: &str = "kyc=info,warn";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Dev logging gate: KYC_DEV_LOG=1 AND dev env (debug build or SHUTTLE_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// 12 hex chars of SHA-256 over the text.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Fingerprint of a record pair; field order and separators are fixed.
pub fn pair_fingerprint(a: &Record, b: &Record) -> String {
    let joined = [a, b]
        .iter()
        .map(|r| [r.name(), r.address(), r.dob(), r.gender()].join("\u{1f}"))
        .collect::<Vec<_>>()
        .join("\u{1e}");
    anon_hash(&joined)
}

/// One line per comparison in dev; silent otherwise.
pub fn dev_log_comparison(a: &Record, b: &Record, result: &ComparisonResult) {
    if !dev_logging_enabled() {
        return;
    }
    let s = &result.detailed_scores;
    info!(
        target: "kyc",
        id = %pair_fingerprint(a, b),
        name = s.name,
        address = s.address,
        dob = s.dob,
        gender = s.gender,
        confidence = result.overall_confidence,
        category = result.match_category.slug(),
        cautions = result.caution_notes.len(),
        "comparison"
    );
}
