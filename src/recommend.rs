//! Recommendation banner for a comparison, keyed off the overall confidence
//! and whether the category carries a caution.

use serde::Serialize;

use crate::result::ComparisonResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ManualReviewCaution,
    ProceedAutomatically,
    SecondaryVerification,
    ManualReview,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

impl Recommendation {
    pub fn from_result(result: &ComparisonResult) -> Self {
        let conf = result.overall_confidence;
        let (kind, message) = if result.match_category.is_caution() {
            (
                RecommendationKind::ManualReviewCaution,
                format!("{}. Manual review recommended.", result.match_category),
            )
        } else if conf >= 90.0 {
            (
                RecommendationKind::ProceedAutomatically,
                "Documents likely belong to the same entity. Automated processing can proceed.".to_string(),
            )
        } else if conf >= 70.0 {
            (
                RecommendationKind::SecondaryVerification,
                "Documents likely match but with minor discrepancies. Consider secondary verification."
                    .to_string(),
            )
        } else if conf >= 50.0 {
            (
                RecommendationKind::ManualReview,
                "Some significant differences found. Manual review recommended.".to_string(),
            )
        } else {
            (
                RecommendationKind::Reject,
                "Documents likely refer to different entities or contain major errors. Manual review required."
                    .to_string(),
            )
        };
        Self { kind, message }
    }
}
