// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod aggregate;
pub mod api;
pub mod dates;
pub mod engine;
pub mod explain;
pub mod fuzzy;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod recommend;
pub mod record;
pub mod result;
pub mod samples;
pub mod score;
pub mod tables;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::engine::{compare, KycMatcher};
pub use crate::recommend::{Recommendation, RecommendationKind};
pub use crate::record::{NormalizedRecord, Record};
pub use crate::result::{ComparisonResult, FieldScoreSet, MatchCategory};
pub use crate::tables::MatchTables;
