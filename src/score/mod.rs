// src/score/mod.rs
//! Per-field similarity scorers. Each returns an integer in 0..=100 and is
//! symmetric in its two inputs.

pub mod address;
pub mod dob;
pub mod gender;
pub mod name;

pub use address::{address_breakdown, score_address, AddressBreakdown};
pub use dob::{score_dob, score_dob_traced, DobRule, DOB_RULES};
pub use gender::score_gender;
pub use name::{score_name, score_name_traced, NamePair, NameRule, NAME_RULES};

/// Not provided: absent, empty or whitespace only.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
