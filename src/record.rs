//! Input records and their normalized preview.
//!
//! A `Record` is the field map one KYC document contributes to a comparison.
//! Every field is optional; absent and empty are treated the same way by the
//! engine ("not provided").

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

/// Identity fields extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Address", alias = "address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "DOB", alias = "dob", default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(rename = "Gender", alias = "gender", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Only used by the normalization preview; comparisons ignore it.
    #[serde(rename = "Company", alias = "company", default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, v: impl Into<String>) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn with_address(mut self, v: impl Into<String>) -> Self {
        self.address = Some(v.into());
        self
    }

    pub fn with_dob(mut self, v: impl Into<String>) -> Self {
        self.dob = Some(v.into());
        self
    }

    pub fn with_gender(mut self, v: impl Into<String>) -> Self {
        self.gender = Some(v.into());
        self
    }

    pub fn with_company(mut self, v: impl Into<String>) -> Self {
        self.company = Some(v.into());
        self
    }

    pub fn name(&self) -> &str {
        field(&self.name)
    }

    pub fn address(&self) -> &str {
        field(&self.address)
    }

    pub fn dob(&self) -> &str {
        field(&self.dob)
    }

    pub fn gender(&self) -> &str {
        field(&self.gender)
    }

    pub fn company(&self) -> &str {
        field(&self.company)
    }

    /// Caller-side precondition for a meaningful comparison.
    pub fn has_name_or_address(&self) -> bool {
        !self.name().trim().is_empty() || !self.address().trim().is_empty()
    }

    /// Lenient parse of pasted JSON text.
    ///
    /// - blank text → empty record
    /// - keys are matched case-insensitively (`"dob"`, `"DOB"`, `"Dob"`)
    /// - only string values are taken; numbers, nulls and nested values are skipped
    /// - anything that is not a JSON object is an error
    pub fn from_json_lenient(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value =
            serde_json::from_str(text).context("record is not valid JSON")?;
        let obj = value
            .as_object()
            .ok_or_else(|| anyhow!("record must be a JSON object"))?;

        let mut rec = Self::default();
        for (key, v) in obj {
            let Some(s) = v.as_str() else { continue };
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "name" => &mut rec.name,
                "address" => &mut rec.address,
                "dob" => &mut rec.dob,
                "gender" => &mut rec.gender,
                "company" => &mut rec.company,
                _ => continue,
            };
            *slot = Some(s.to_string());
        }
        Ok(rec)
    }
}

fn field(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

/// Canonical forms of every field of a record, as the scorers see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub address: String,
    pub company: String,
    /// ISO `YYYY-MM-DD`, or `null` when the input is absent or unparseable.
    pub dob: Option<String>,
    pub gender: String,
}
