//! Edit-distance based string similarity, scaled to 0..=100.
//!
//! `ratio` is the InDel similarity `2 * LCS / (len_a + len_b)`: insertions and
//! deletions cost 1, a substitution costs 2. The token variants pre-process both
//! inputs (lowercase, non-alphanumerics become spaces) and compare token
//! arrangements instead of raw strings. Nothing here knows about KYC records.

use std::collections::BTreeSet;

/// Similarity of two strings in 0..=100. Empty input on either side scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let lcs = lcs_len(&a, &b);
    let r = (2 * lcs) as f64 / total as f64;
    // halves go to the even neighbour: 12.5 -> 12
    (r * 100.0).round_ties_even() as u8
}

/// Order-insensitive: both sides' tokens are sorted before comparing.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let mut ta = tokens(a);
    let mut tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0;
    }
    ta.sort_unstable();
    tb.sort_unstable();
    ratio(&ta.join(" "), &tb.join(" "))
}

/// Set-based: compares the shared tokens against each side's shared+extra tokens,
/// so a string that is a token subset of the other scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let sa: BTreeSet<String> = tokens(a).into_iter().collect();
    let sb: BTreeSet<String> = tokens(b).into_iter().collect();
    if sa.is_empty() || sb.is_empty() {
        return 0;
    }

    let sect = join(sa.intersection(&sb));
    let diff_ab = join(sa.difference(&sb));
    let diff_ba = join(sb.difference(&sa));

    let t1 = format!("{sect} {diff_ab}").trim().to_string();
    let t2 = format!("{sect} {diff_ba}").trim().to_string();

    ratio(&sect, &t1).max(ratio(&sect, &t2)).max(ratio(&t1, &t2))
}

/// Higher of the sort and set variants.
pub fn best_ratio(a: &str, b: &str) -> u8 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

fn tokens(s: &str) -> Vec<String> {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().map(str::to_string).collect()
}

fn join<'a>(it: impl Iterator<Item = &'a String>) -> String {
    it.map(String::as_str).collect::<Vec<_>>().join(" ")
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_basics() {
        assert_eq!(ratio("abc", "abc"), 100);
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(ratio("abc", "xyz"), 0);
        // lcs("kitten","sitting") = 4 ("ittn") -> 8/13
        assert_eq!(ratio("kitten", "sitting"), 62);
    }

    #[test]
    fn ratio_rounds_half_to_even() {
        // 2 * 1 / 16 = 12.5%
        assert_eq!(ratio("a", "abcdefghijklmno"), 12);
        // 2 * 1 / 8 = 25%, 2 * 3 / 16 = 37.5%
        assert_eq!(ratio("a", "abcdefg"), 25);
        assert_eq!(ratio("abc", "abcxxxxxxxxxx"), 38);
    }

    #[test]
    fn sort_ratio_ignores_order_and_case() {
        assert_eq!(token_sort_ratio("Kumar Rajeev", "rajeev KUMAR"), 100);
        assert_eq!(token_sort_ratio("", "x"), 0);
    }

    #[test]
    fn set_ratio_rewards_subsets() {
        assert_eq!(token_set_ratio("anita sharma", "anita r sharma"), 100);
        assert!(token_sort_ratio("anita sharma", "anita r sharma") < 100);
    }

    #[test]
    fn set_ratio_without_overlap() {
        // sect is empty -> only ratio(t1, t2) can contribute
        assert_eq!(token_set_ratio("abc", "abd"), ratio("abc", "abd"));
        assert_eq!(ratio("abc", "abd"), 67);
    }

    #[test]
    fn punctuation_is_token_separator() {
        assert_eq!(token_sort_ratio("sec-17", "17 sec"), 100);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("ashok kumar mehta", "a. k. mehta"),
            ("block 3 shakti nagar", "block iii shakti nagar new delhi"),
            ("x", "xyz abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a));
            assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
            assert_eq!(token_set_ratio(a, b), token_set_ratio(b, a));
        }
    }
}
