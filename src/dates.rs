//! Best-effort free-form date parsing for DOB fields.
//!
//! Accepted shapes (separators `/ - . , space`, freely mixed):
//! - `YYYY-MM-DD` (falls back to `YYYY-DD-MM` when the middle part can't be a month)
//! - `A/B/YYYY`, `A/B/YY`: month-first when valid, otherwise day-first
//! - `YYYYMMDD`
//! - month names anywhere: `15 Aug 1985`, `August 15, 1985`, `15th-aug-85`
//! - ISO date followed by a time part (`1985-08-15T10:00:00Z`)
//!
//! Two-digit years pivot at 30: `00..=29` → 20xx, `30..=99` → 19xx.
//! Anything else, including impossible calendar dates, yields `None`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_WITH_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}[-/.]\d{1,2}[-/.]\d{1,2})[t ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:z|[+-]\d{2}:?\d{2})?$",
    )
    .expect("iso datetime regex")
});

const MONTHS: [(&str, u32); 12] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    /// Numeric token: value and digit count.
    Num(u32, usize),
    Month(u32),
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let s = ISO_WITH_TIME
        .captures(&lower)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .unwrap_or(lower);

    let parts = split_parts(&s)?;
    match parts.as_slice() {
        [Part::Num(v, 8)] => compact(*v),
        [a, b, c] => {
            if parts.iter().any(|p| matches!(p, Part::Month(_))) {
                with_month_name(a, b, c)
            } else {
                numeric(a, b, c)
            }
        }
        _ => None,
    }
}

const WEEKDAYS: [&str; 7] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

/// Full weekday names and their common abbreviations ("mon", "tues", "thurs").
fn is_weekday(tok: &str) -> bool {
    tok.len() >= 3 && WEEKDAYS.iter().any(|w| w.starts_with(tok) && (tok.len() <= 5 || *w == tok))
}

fn split_parts(s: &str) -> Option<Vec<Part>> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !is_weekday(t))
        .map(parse_part)
        .collect()
}

fn parse_part(tok: &str) -> Option<Part> {
    let digits = strip_ordinal(tok);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if digits.len() > 8 {
            return None;
        }
        return digits.parse::<u32>().ok().map(|v| Part::Num(v, digits.len()));
    }
    month_from_name(tok).map(Part::Month)
}

fn strip_ordinal(tok: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(head) = tok.strip_suffix(suffix) {
            if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()) {
                return head;
            }
        }
    }
    tok
}

fn month_from_name(tok: &str) -> Option<u32> {
    if tok == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .find(|(full, _)| *full == tok || (tok.len() == 3 && full.starts_with(tok)))
        .map(|(_, m)| *m)
}

fn compact(v: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt((v / 10_000) as i32, (v / 100) % 100, v % 100)
}

fn year_of(v: u32, digits: usize) -> Option<i32> {
    match digits {
        4 => Some(v as i32),
        1 | 2 if v < 30 => Some(2000 + v as i32),
        1 | 2 => Some(1900 + v as i32),
        _ => None,
    }
}

fn numeric(a: &Part, b: &Part, c: &Part) -> Option<NaiveDate> {
    let (Part::Num(a, la), Part::Num(b, lb), Part::Num(c, lc)) = (a, b, c) else {
        return None;
    };
    if *la == 4 {
        if *lb > 2 || *lc > 2 {
            return None;
        }
        let y = *a as i32;
        return NaiveDate::from_ymd_opt(y, *b, *c).or_else(|| {
            if *b > 12 {
                NaiveDate::from_ymd_opt(y, *c, *b)
            } else {
                None
            }
        });
    }
    if *la > 2 || *lb > 2 {
        return None;
    }
    let y = match lc {
        2 | 4 => year_of(*c, *lc)?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(y, *a, *b).or_else(|| NaiveDate::from_ymd_opt(y, *b, *a))
}

fn with_month_name(a: &Part, b: &Part, c: &Part) -> Option<NaiveDate> {
    let mut month = None;
    let mut nums = Vec::with_capacity(2);
    for p in [a, b, c] {
        match p {
            Part::Month(m) if month.is_none() => month = Some(*m),
            Part::Month(_) => return None,
            Part::Num(v, len) => nums.push((*v, *len)),
        }
    }
    let month = month?;
    let [(n1, l1), (n2, l2)] = nums.as_slice() else {
        return None;
    };
    let (day, year) = if *l1 == 4 {
        (*n2, year_of(*n1, *l1)?)
    } else {
        (*n1, year_of(*n2, *l2)?)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
