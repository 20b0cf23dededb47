//! Overall confidence from the four field scores.
//!
//! Base = 0.4*name + 0.3*address + 0.2*dob + 0.1*gender, then a chain of
//! multiplicative penalties applied in a fixed order (they compound), an
//! optional cap, a clamp to 0..=100 and rounding to 2 decimals.

use serde::Serialize;
use tracing::debug;

use crate::record::Record;
use crate::result::FieldScoreSet;
use crate::score::dob::DOB_AMBIGUOUS;
use crate::score::is_blank;

pub const W_NAME: f64 = 0.4;
pub const W_ADDRESS: f64 = 0.3;
pub const W_DOB: f64 = 0.2;
pub const W_GENDER: f64 = 0.1;

pub const MAJOR_MISMATCH_FACTOR: f64 = 0.7;
pub const GENDER_MISMATCH_FACTOR: f64 = 0.8;
pub const DOB_AMBIGUITY_FACTOR: f64 = 0.7;
pub const DOB_MISMATCH_FACTOR: f64 = 0.7;
/// Ceiling when the DOB is ambiguous and a caution was raised.
pub const AMBIGUOUS_CAP: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// name < 50 or address < 40
    MajorMismatch,
    /// both genders given and different
    GenderMismatch,
    /// DOB scored exactly 50
    DobAmbiguity,
    /// both DOBs given and scored 0
    DobMismatch,
    /// caution raised with an ambiguous DOB
    AmbiguityCap,
}

/// Confidence plus the adjustments that shaped it, in application order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub base: f64,
    pub confidence: f64,
    pub adjustments: Vec<Adjustment>,
}

pub fn weighted_base(s: &FieldScoreSet) -> f64 {
    f64::from(s.name) * W_NAME
        + f64::from(s.address) * W_ADDRESS
        + f64::from(s.dob) * W_DOB
        + f64::from(s.gender) * W_GENDER
}

/// `caution` is whether the explainer raised any caution note.
pub fn aggregate(s: &FieldScoreSet, doc_a: &Record, doc_b: &Record, caution: bool) -> Aggregate {
    let base = weighted_base(s);
    let mut conf = base;
    let mut adjustments = Vec::new();

    if s.name < 50 || s.address < 40 {
        conf *= MAJOR_MISMATCH_FACTOR;
        adjustments.push(Adjustment::MajorMismatch);
    }
    if s.gender == 0 && both_given(doc_a.gender(), doc_b.gender()) {
        conf *= GENDER_MISMATCH_FACTOR;
        adjustments.push(Adjustment::GenderMismatch);
    }
    if s.dob == DOB_AMBIGUOUS {
        conf *= DOB_AMBIGUITY_FACTOR;
        adjustments.push(Adjustment::DobAmbiguity);
    }
    if s.dob == 0 && both_given(doc_a.dob(), doc_b.dob()) {
        conf *= DOB_MISMATCH_FACTOR;
        adjustments.push(Adjustment::DobMismatch);
    }
    if caution && s.dob == DOB_AMBIGUOUS && conf > AMBIGUOUS_CAP {
        conf = AMBIGUOUS_CAP;
        adjustments.push(Adjustment::AmbiguityCap);
    }

    let confidence = round2(conf.clamp(0.0, 100.0));
    debug!(target: "kyc", base, confidence, ?adjustments, "confidence aggregated");
    Aggregate {
        base,
        confidence,
        adjustments,
    }
}

fn both_given(a: &str, b: &str) -> bool {
    !is_blank(a) && !is_blank(b)
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
