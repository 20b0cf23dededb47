//! Human-readable explanation lines and caution notes for a set of field
//! scores. Runs alongside the aggregator on the same inputs.

use crate::result::FieldScoreSet;
use crate::score::dob::DOB_AMBIGUOUS;

pub const CAUTION_PREFIX: &str = "CAUTION: ";
pub const MIDDLE_NAME_CAUTION: &str = "Middle name discrepancy detected";
pub const DOB_AMBIGUITY_CAUTION: &str = "DOB ambiguity: possible MM/DD vs DD/MM format confusion";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    /// One line per field, in name / address / dob / gender order.
    pub lines: Vec<String>,
    pub cautions: Vec<String>,
}

impl Explanation {
    pub fn has_caution(&self) -> bool {
        !self.cautions.is_empty()
    }

    /// Field lines followed by the joined caution line, if any.
    pub fn into_lines(self) -> Vec<String> {
        let mut out = self.lines;
        if let Some(line) = caution_line(&self.cautions) {
            out.push(line);
        }
        out
    }
}

pub fn caution_line(cautions: &[String]) -> Option<String> {
    if cautions.is_empty() {
        None
    } else {
        Some(format!("{CAUTION_PREFIX}{}", cautions.join("; ")))
    }
}

/// `name_a`/`name_b` are the normalized names; only their token counts matter.
pub fn explain(scores: &FieldScoreSet, name_a: &str, name_b: &str) -> Explanation {
    let mut ex = Explanation::default();

    ex.lines.push(graded_line("Names", scores.name));
    if (80..95).contains(&scores.name) && token_count(name_a) != token_count(name_b) {
        ex.cautions.push(MIDDLE_NAME_CAUTION.to_string());
    }

    ex.lines.push(graded_line("Addresses", scores.address));

    ex.lines.push(match scores.dob {
        100 => "DOB matches exactly".to_string(),
        DOB_AMBIGUOUS => "Possible DOB format confusion (MM/DD vs DD/MM)".to_string(),
        0 => "DOB does not match".to_string(),
        n => format!("DOB has some similarity ({n}%)"),
    });
    if scores.dob == DOB_AMBIGUOUS {
        ex.cautions.push(DOB_AMBIGUITY_CAUTION.to_string());
    }

    ex.lines.push(if scores.gender == 100 {
        "Gender matches".to_string()
    } else {
        "Gender does not match".to_string()
    });

    ex
}

fn graded_line(subject: &str, score: u8) -> String {
    match score {
        95.. => format!("{subject} match with high confidence ({score}%)"),
        80..=94 => format!("{subject} are likely to match ({score}%)"),
        60..=79 => format!("{subject} have some similarity ({score}%)"),
        _ => format!("{subject} differ significantly ({score}%)"),
    }
}

fn token_count(s: &str) -> usize {
    s.split_whitespace().count()
}
