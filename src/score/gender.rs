// src/score/gender.rs
use crate::normalize::normalize_gender;

/// 100 when both sides are equal ignoring case and surrounding whitespace
/// (two blanks count as equal), otherwise 0.
pub fn score_gender(a: &str, b: &str) -> u8 {
    if normalize_gender(a) == normalize_gender(b) {
        100
    } else {
        0
    }
}
