// src/score/address.rs
//! Address similarity: fuzzy base score on normalized forms, a small penalty
//! per abbreviation in play, and a postal-code bonus.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::is_blank;
use crate::fuzzy;
use crate::normalize::normalize_address;
use crate::tables::MatchTables;

/// First standalone 5- or 6-digit number (Indian PIN codes are 6 digits).
static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{5,6}\b").expect("postal code regex"));

const ABBREVIATION_PENALTY: u32 = 2;
const POSTAL_EXACT_BONUS: u32 = 25;
const POSTAL_NEAR_BONUS: u32 = 15;
const POSTAL_NEAR_DISTANCE: u64 = 5;

/// How an address score was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressBreakdown {
    /// max(token sort, token set) on normalized forms; 100 when they are equal.
    pub base: u8,
    /// Distinct abbreviation keys seen in either raw address.
    pub abbreviations: u32,
    pub postal_bonus: u32,
    pub score: u8,
}

impl AddressBreakdown {
    fn zero() -> Self {
        Self {
            base: 0,
            abbreviations: 0,
            postal_bonus: 0,
            score: 0,
        }
    }
}

pub fn score_address(a: &str, b: &str, tables: &MatchTables) -> u8 {
    address_breakdown(a, b, tables).score
}

pub fn address_breakdown(a: &str, b: &str, tables: &MatchTables) -> AddressBreakdown {
    if is_blank(a) || is_blank(b) {
        return AddressBreakdown::zero();
    }
    let na = normalize_address(a, tables);
    let nb = normalize_address(b, tables);
    // equal forms win even when both are punctuation only
    if na == nb {
        return AddressBreakdown {
            base: 100,
            abbreviations: 0,
            postal_bonus: 0,
            score: 100,
        };
    }
    if na.is_empty() || nb.is_empty() {
        return AddressBreakdown::zero();
    }

    let base = fuzzy::best_ratio(&na, &nb);
    let abbreviations = count_abbreviations(a, b, tables);
    let penalized = u32::from(base).saturating_sub(abbreviations * ABBREVIATION_PENALTY);
    let postal_bonus = postal_bonus(a, b);
    let score = (penalized + postal_bonus).min(100) as u8;

    debug!(
        target: "kyc",
        base, abbreviations, postal_bonus, score,
        "address scored"
    );
    AddressBreakdown {
        base,
        abbreviations,
        postal_bonus,
        score,
    }
}

/// Substring test on the raw (lowercased) text, so "st" also counts inside
/// "street".
fn count_abbreviations(a: &str, b: &str, tables: &MatchTables) -> u32 {
    let la = a.to_lowercase();
    let lb = b.to_lowercase();
    tables
        .abbreviations
        .keys()
        .filter(|k| la.contains(k.as_str()) || lb.contains(k.as_str()))
        .count() as u32
}

pub(crate) fn extract_postal_code(raw: &str) -> Option<u64> {
    POSTAL_CODE
        .find(raw)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

fn postal_bonus(a: &str, b: &str) -> u32 {
    match (extract_postal_code(a), extract_postal_code(b)) {
        (Some(pa), Some(pb)) if pa == pb => POSTAL_EXACT_BONUS,
        (Some(pa), Some(pb)) if pa.abs_diff(pb) <= POSTAL_NEAR_DISTANCE => POSTAL_NEAR_BONUS,
        _ => 0,
    }
}
