//! Field normalizers: canonical, comparable forms of names, addresses,
//! company names and dates.
//!
//! Every normalizer is total (never fails) and idempotent:
//! `normalize(normalize(x)) == normalize(x)`.

use crate::dates;
use crate::record::{NormalizedRecord, Record};
use crate::tables::MatchTables;

/// Lowercase, drop punctuation (keeping initials such as `a.`), remove leading
/// salutations, collapse whitespace.
///
/// "Dr. A. K. Mehta" → "a. k. mehta"
pub fn normalize_name(raw: &str, tables: &MatchTables) -> String {
    let lower: Vec<char> = raw.trim().to_lowercase().chars().collect();
    let mut cleaned = String::with_capacity(lower.len());
    for (i, &c) in lower.iter().enumerate() {
        if is_word_char(c) || c.is_whitespace() {
            cleaned.push(c);
        } else if c == '.' && follows_single_letter(&lower, i) {
            cleaned.push('.');
        } else {
            cleaned.push(' ');
        }
    }

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let leading = tokens
        .iter()
        .take_while(|t| tables.is_salutation(&t.replace('.', "")))
        .count();
    tokens.drain(..leading);
    tokens.join(" ")
}

/// Lowercase, punctuation → spaces, expand abbreviation tokens, collapse whitespace.
///
/// "123 Mahatma Gandhi Rd., Blr, KA" → "123 mahatma gandhi road bangalore karnataka"
pub fn normalize_address(raw: &str, tables: &MatchTables) -> String {
    let cleaned = strip_punctuation(&raw.trim().to_lowercase());
    cleaned
        .split_whitespace()
        .map(|tok| tables.expand(tok).unwrap_or(tok))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, punctuation → spaces, drop legal suffixes, then resolve known
/// aliases to the group's primary name.
///
/// "Meta Platforms, Inc." → "facebook"
pub fn normalize_company(raw: &str, tables: &MatchTables) -> String {
    let cleaned = strip_punctuation(&raw.trim().to_lowercase());
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let unstripped = tokens.join(" ");
    let stripped = tokens
        .iter()
        .copied()
        .filter(|t| !tables.is_company_suffix(t))
        .collect::<Vec<_>>()
        .join(" ");

    tables
        .company_aliases
        .iter()
        .find(|g| g.matches(&stripped) || g.aliases.iter().any(|a| *a == unstripped))
        .map(|g| g.primary.clone())
        .unwrap_or(stripped)
}

/// ISO `YYYY-MM-DD` form of a date, or `None` when absent/unparseable.
pub fn normalize_date(raw: &str) -> Option<String> {
    dates::parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn normalize_gender(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// All normalized forms of a record (preview / diagnostics).
pub fn normalize_record(rec: &Record, tables: &MatchTables) -> NormalizedRecord {
    NormalizedRecord {
        name: normalize_name(rec.name(), tables),
        address: normalize_address(rec.address(), tables),
        company: normalize_company(rec.company(), tables),
        dob: normalize_date(rec.dob()),
        gender: normalize_gender(rec.gender()),
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect()
}

/// `chars[i]` directly follows a letter that starts a token (an initial).
fn follows_single_letter(chars: &[char], i: usize) -> bool {
    if i == 0 || !chars[i - 1].is_alphabetic() {
        return false;
    }
    i == 1 || !is_word_char(chars[i - 2])
}
