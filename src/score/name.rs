// src/score/name.rs
//! Name similarity as a prioritized rule list. Rules are tried in order and
//! the first one that returns a score wins; `fuzzy` always answers, so the
//! list is total.
//!
//! | rule              | score | fires when                                           |
//! |-------------------|-------|------------------------------------------------------|
//! | `identical`       | 100   | normalized names are equal                           |
//! | `reordered`       | 95    | same token set, different order                      |
//! | `middle_name_gap` | 80    | token counts differ, first and last tokens equal     |
//! | `substring`       | 85    | one normalized name contains the other               |
//! | `initials`        | 80    | same surname, every initial matches a given name     |
//! | `fuzzy`           | 0-100 | max(token sort ratio, token set ratio)               |

use std::collections::BTreeSet;

use tracing::debug;

use super::is_blank;
use crate::fuzzy;
use crate::normalize::normalize_name;
use crate::tables::MatchTables;

/// Both normalized names plus their tokens.
#[derive(Debug, Clone)]
pub struct NamePair<'a> {
    pub a: &'a str,
    pub b: &'a str,
    pub tokens_a: Vec<&'a str>,
    pub tokens_b: Vec<&'a str>,
}

impl<'a> NamePair<'a> {
    /// Build from already-normalized names.
    pub fn new(a: &'a str, b: &'a str) -> Self {
        Self {
            a,
            b,
            tokens_a: a.split_whitespace().collect(),
            tokens_b: b.split_whitespace().collect(),
        }
    }
}

pub struct NameRule {
    pub name: &'static str,
    pub apply: fn(&NamePair<'_>) -> Option<u8>,
}

pub const NAME_RULES: &[NameRule] = &[
    NameRule { name: "identical", apply: identical },
    NameRule { name: "reordered", apply: reordered },
    NameRule { name: "middle_name_gap", apply: middle_name_gap },
    NameRule { name: "substring", apply: substring },
    NameRule { name: "initials", apply: initials },
    NameRule { name: "fuzzy", apply: fuzzy_fallback },
];

pub fn score_name(a: &str, b: &str, tables: &MatchTables) -> u8 {
    score_name_traced(a, b, tables).0
}

/// Score plus the name of the rule that decided it (`"empty"` when a side is blank).
pub fn score_name_traced(a: &str, b: &str, tables: &MatchTables) -> (u8, &'static str) {
    if is_blank(a) || is_blank(b) {
        return (0, "empty");
    }
    let na = normalize_name(a, tables);
    let nb = normalize_name(b, tables);
    // e.g. a bare salutation: nothing left to compare
    if na.is_empty() || nb.is_empty() {
        return (0, "empty");
    }

    let pair = NamePair::new(&na, &nb);
    let (score, rule) = apply_rules(&pair);
    debug!(target: "kyc", rule, score, "name rule fired");
    (score, rule)
}

fn apply_rules(pair: &NamePair<'_>) -> (u8, &'static str) {
    for rule in NAME_RULES {
        if let Some(score) = (rule.apply)(pair) {
            return (score.min(100), rule.name);
        }
    }
    (0, "none")
}

fn identical(p: &NamePair<'_>) -> Option<u8> {
    (p.a == p.b).then_some(100)
}

fn reordered(p: &NamePair<'_>) -> Option<u8> {
    let sa: BTreeSet<&str> = p.tokens_a.iter().copied().collect();
    let sb: BTreeSet<&str> = p.tokens_b.iter().copied().collect();
    (sa == sb).then_some(95)
}

fn middle_name_gap(p: &NamePair<'_>) -> Option<u8> {
    if p.tokens_a.len() == p.tokens_b.len() {
        return None;
    }
    let same_last = p.tokens_a.last() == p.tokens_b.last();
    let same_first = p.tokens_a.first() == p.tokens_b.first();
    (same_last && same_first).then_some(80)
}

fn substring(p: &NamePair<'_>) -> Option<u8> {
    (p.a.contains(p.b) || p.b.contains(p.a)).then_some(85)
}

fn initials(p: &NamePair<'_>) -> Option<u8> {
    if p.tokens_a.last() != p.tokens_b.last() {
        return None;
    }
    let has_a = p.a.contains('.');
    let has_b = p.b.contains('.');
    if !has_a && !has_b {
        return None;
    }
    let a_ok = !has_a || initials_covered(&p.tokens_a, &p.tokens_b);
    let b_ok = !has_b || initials_covered(&p.tokens_b, &p.tokens_a);
    (a_ok && b_ok).then_some(80)
}

fn fuzzy_fallback(p: &NamePair<'_>) -> Option<u8> {
    Some(fuzzy::best_ratio(p.a, p.b))
}

/// Every initial in `with` (tokens carrying a period) is the first letter of
/// some non-final token of `other`.
fn initials_covered(with: &[&str], other: &[&str]) -> bool {
    let given: Vec<char> = other
        .iter()
        .take(other.len().saturating_sub(1))
        .filter_map(|t| t.chars().next())
        .collect();

    with.iter()
        .filter(|t| t.contains('.'))
        .flat_map(|t| t.split('.'))
        .filter_map(|part| part.chars().next())
        .all(|letter| given.contains(&letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(a: &str, b: &str) -> (u8, &'static str) {
        score_name_traced(a, b, MatchTables::builtin())
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(score("", "Anita Sharma"), (0, "empty"));
        assert_eq!(score("Anita Sharma", "   "), (0, "empty"));
        assert_eq!(score("Mr.", "Anita Sharma"), (0, "empty"));
    }

    #[test]
    fn identical_after_normalization() {
        assert_eq!(score("Dr. Anita Sharma", "anita  SHARMA"), (100, "identical"));
    }

    #[test]
    fn reordered_tokens() {
        assert_eq!(score("Kumar Rajeev", "Rajeev Kumar"), (95, "reordered"));
    }

    #[test]
    fn middle_name_gap_beats_substring() {
        assert_eq!(score("Anita Sharma", "Anita R. Sharma"), (80, "middle_name_gap"));
        assert_eq!(score("Sunil Kumar Sharma", "Sunil Sharma"), (80, "middle_name_gap"));
    }

    #[test]
    fn substring_match() {
        // token counts differ but first tokens differ, so rule 3 is skipped
        assert_eq!(score("Rajeev Kumar", "Kumar"), (85, "substring"));
    }

    #[test]
    fn initials_expand_to_given_names() {
        assert_eq!(score("Dr. A. K. Mehta", "Ashok Kumar Mehta"), (80, "initials"));
        assert_eq!(score("S. Ramesh", "Subramaniam Ramesh"), (80, "initials"));
        assert_eq!(score("A.K. Mehta", "Ashok Kumar Mehta"), (80, "initials"));
    }

    #[test]
    fn unmatched_initials_fall_through_to_fuzzy() {
        let (s, rule) = score("B. K. Mehta", "Ashok Kumar Mehta");
        assert_eq!(rule, "fuzzy");
        assert!(s < 80, "got {s}");
    }

    #[test]
    fn unrelated_names_score_low() {
        let (s, rule) = score("Anita Sharma", "Rohit Verma");
        assert_eq!(rule, "fuzzy");
        assert!(s < 60, "got {s}");
    }

    #[test]
    fn each_rule_in_isolation() {
        let p = NamePair::new("a. k. mehta", "ashok kumar mehta");
        assert_eq!(identical(&p), None);
        assert_eq!(reordered(&p), None);
        assert_eq!(middle_name_gap(&p), None);
        assert_eq!(substring(&p), None);
        assert_eq!(initials(&p), Some(80));
        assert!(fuzzy_fallback(&p).is_some());
    }

    #[test]
    fn rules_are_symmetric() {
        let pairs = [
            ("a. k. mehta", "ashok kumar mehta"),
            ("a. mehta", "b. mehta"),
            ("anita sharma", "anita r. sharma"),
            ("kumar", "rajeev kumar"),
        ];
        for (a, b) in pairs {
            let ab = apply_rules(&NamePair::new(a, b));
            let ba = apply_rules(&NamePair::new(b, a));
            assert_eq!(ab, ba, "{a} vs {b}");
        }
    }
}
