//! # Matching Engine
//! Pure, testable logic that maps `(doc_a, doc_b)` → `ComparisonResult`.
//! No I/O and no shared mutable state: one call allocates its own
//! intermediates, so a `KycMatcher` can be shared freely across threads.
//!
//! Flow: normalize → field scorers → {aggregator, explainer} → result.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::explain::explain;
use crate::normalize::{normalize_name, normalize_record};
use crate::record::{NormalizedRecord, Record};
use crate::result::{ComparisonResult, FieldScoreSet, MatchCategory};
use crate::score::{score_address, score_dob_traced, score_gender, score_name_traced};
use crate::tables::MatchTables;

static DEFAULT_MATCHER: Lazy<KycMatcher> = Lazy::new(KycMatcher::default);

/// Compare two records with the built-in tables.
pub fn compare(doc_a: &Record, doc_b: &Record) -> ComparisonResult {
    DEFAULT_MATCHER.compare(doc_a, doc_b)
}

#[derive(Debug, Clone, Default)]
pub struct KycMatcher {
    tables: MatchTables,
}

impl KycMatcher {
    pub fn new(tables: MatchTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &MatchTables {
        &self.tables
    }

    /// Field scores only, without aggregation or explanations.
    pub fn field_scores(&self, doc_a: &Record, doc_b: &Record) -> FieldScoreSet {
        let (name, name_rule) = score_name_traced(doc_a.name(), doc_b.name(), &self.tables);
        let address = score_address(doc_a.address(), doc_b.address(), &self.tables);
        let (dob, dob_rule) = score_dob_traced(doc_a.dob(), doc_b.dob());
        let gender = score_gender(doc_a.gender(), doc_b.gender());
        debug!(target: "kyc", name_rule, dob_rule, "field rules");
        FieldScoreSet::new(name, address, dob, gender)
    }

    pub fn compare(&self, doc_a: &Record, doc_b: &Record) -> ComparisonResult {
        let scores = self.field_scores(doc_a, doc_b);

        let name_a = normalize_name(doc_a.name(), &self.tables);
        let name_b = normalize_name(doc_b.name(), &self.tables);
        let explanation = explain(&scores, &name_a, &name_b);

        let agg = aggregate(&scores, doc_a, doc_b, explanation.has_caution());
        let match_category = MatchCategory::from_confidence(agg.confidence, explanation.has_caution());
        let caution_notes = explanation.cautions.clone();

        ComparisonResult {
            detailed_scores: scores,
            overall_confidence: agg.confidence,
            match_category,
            explanations: explanation.into_lines(),
            caution_notes,
        }
    }

    pub fn normalize(&self, rec: &Record) -> NormalizedRecord {
        normalize_record(rec, &self.tables)
    }
}
