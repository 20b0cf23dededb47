// src/score/dob.rs
//! Date-of-birth similarity: one of {0, 50, 80, 100}.
//!
//! A score of 50 marks a structurally ambiguous match (day/month swap or a
//! different year only); the explainer raises a caution for it.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::dates::parse_date;

pub struct DobRule {
    pub name: &'static str,
    pub apply: fn(NaiveDate, NaiveDate) -> Option<u8>,
}

pub const DOB_RULES: &[DobRule] = &[
    DobRule { name: "exact", apply: exact },
    DobRule { name: "day_month_swap", apply: day_month_swap },
    DobRule { name: "year_only_differs", apply: year_only_differs },
    DobRule { name: "within_five_days", apply: within_five_days },
];

pub const DOB_AMBIGUOUS: u8 = 50;

pub fn score_dob(a: &str, b: &str) -> u8 {
    score_dob_traced(a, b).0
}

/// Score plus the deciding rule: `"unparseable"` when either side is not a
/// date, `"no_match"` when no rule fired.
pub fn score_dob_traced(a: &str, b: &str) -> (u8, &'static str) {
    let (Some(da), Some(db)) = (parse_date(a), parse_date(b)) else {
        return (0, "unparseable");
    };
    let (score, rule) = DOB_RULES
        .iter()
        .find_map(|r| (r.apply)(da, db).map(|s| (s, r.name)))
        .unwrap_or((0, "no_match"));
    debug!(target: "kyc", rule, score, "dob rule fired");
    (score, rule)
}

fn exact(a: NaiveDate, b: NaiveDate) -> Option<u8> {
    (a == b).then_some(100)
}

fn day_month_swap(a: NaiveDate, b: NaiveDate) -> Option<u8> {
    let swapped = NaiveDate::from_ymd_opt(b.year(), b.day(), b.month())?;
    (swapped == a).then_some(DOB_AMBIGUOUS)
}

fn year_only_differs(a: NaiveDate, b: NaiveDate) -> Option<u8> {
    (a.month() == b.month() && a.day() == b.day()).then_some(DOB_AMBIGUOUS)
}

fn within_five_days(a: NaiveDate, b: NaiveDate) -> Option<u8> {
    ((a - b).num_days().abs() <= 5).then_some(80)
}
