//! Output shape of a comparison: per-field scores, overall
//! confidence, categorical verdict and explanation lines.

use serde::{Deserialize, Serialize};

/// Per-field similarity scores, each in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldScoreSet {
    #[serde(rename = "name_similarity")]
    pub name: u8,
    #[serde(rename = "address_similarity")]
    pub address: u8,
    #[serde(rename = "dob_similarity")]
    pub dob: u8,
    #[serde(rename = "gender_match")]
    pub gender: u8,
}

impl FieldScoreSet {
    pub fn new(name: u8, address: u8, dob: u8, gender: u8) -> Self {
        Self {
            name: name.min(100),
            address: address.min(100),
            dob: dob.min(100),
            gender: gender.min(100),
        }
    }
}

/// Verdict label, ordered from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchCategory {
    #[serde(rename = "High confidence match")]
    High,
    #[serde(rename = "Medium-to-high confidence match")]
    MediumToHigh,
    #[serde(rename = "Medium confidence match with caution")]
    MediumWithCaution,
    #[serde(rename = "Medium confidence match")]
    Medium,
    #[serde(rename = "Low-to-medium confidence match")]
    LowToMedium,
    #[serde(rename = "No match")]
    NoMatch,
}

impl MatchCategory {
    /// Thresholds: 90 / 70 / 50 / 30. A caution only changes the 50..70 band.
    pub fn from_confidence(confidence: f64, caution: bool) -> Self {
        if confidence >= 90.0 {
            Self::High
        } else if confidence >= 70.0 {
            Self::MediumToHigh
        } else if confidence >= 50.0 {
            if caution {
                Self::MediumWithCaution
            } else {
                Self::Medium
            }
        } else if confidence >= 30.0 {
            Self::LowToMedium
        } else {
            Self::NoMatch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High confidence match",
            Self::MediumToHigh => "Medium-to-high confidence match",
            Self::MediumWithCaution => "Medium confidence match with caution",
            Self::Medium => "Medium confidence match",
            Self::LowToMedium => "Low-to-medium confidence match",
            Self::NoMatch => "No match",
        }
    }

    /// Short, stable identifier (metrics labels, logs).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::MediumToHigh => "medium_to_high",
            Self::MediumWithCaution => "medium_with_caution",
            Self::Medium => "medium",
            Self::LowToMedium => "low_to_medium",
            Self::NoMatch => "no_match",
        }
    }

    pub fn is_caution(&self) -> bool {
        self.label().to_ascii_lowercase().contains("caution")
    }
}

impl std::fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub detailed_scores: FieldScoreSet,
    /// 0.0..=100.0, rounded to 2 decimals.
    pub overall_confidence: f64,
    pub match_category: MatchCategory,
    /// Per-field lines, then one `CAUTION: ...` line if any caution was raised.
    pub explanations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caution_notes: Vec<String>,
}

impl ComparisonResult {
    pub fn has_caution(&self) -> bool {
        !self.caution_notes.is_empty()
    }
}
