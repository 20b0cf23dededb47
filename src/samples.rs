//! Gallery of named sample document pairs, embedded from `config/samples.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCase {
    pub id: String,
    pub title: String,
    pub doc_a: Record,
    pub doc_b: Record,
}

/// `{ id, title }` listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

static SAMPLES: Lazy<Vec<SampleCase>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../config/samples.json")).expect("embedded samples.json is valid")
});

pub fn all() -> &'static [SampleCase] {
    &SAMPLES
}

pub fn summaries() -> Vec<SampleSummary<'static>> {
    all()
        .iter()
        .map(|s| SampleSummary {
            id: &s.id,
            title: &s.title,
        })
        .collect()
}

pub fn find(id: &str) -> Option<&'static SampleCase> {
    all().iter().find(|s| s.id == id)
}
