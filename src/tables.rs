//! Static heuristic tables: salutations, address abbreviations, company
//! legal suffixes and company alias groups.
//!
//! The defaults are embedded from `config/match_tables.toml`. The service can
//! point `KYC_TABLES_PATH` at another file; the tables are parsed once at
//! startup and never mutated afterwards.

use anyhow::{anyhow, bail, Context};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_TABLES_PATH: &str = "config/match_tables.toml";
pub const ENV_TABLES_PATH: &str = "KYC_TABLES_PATH";

static BUILTIN: Lazy<MatchTables> = Lazy::new(|| {
    let raw = include_str!("../config/match_tables.toml");
    MatchTables::from_toml_str(raw).expect("valid embedded match tables")
});

/// One company and the other names it is known by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasGroup {
    pub primary: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl AliasGroup {
    pub fn matches(&self, candidate: &str) -> bool {
        self.primary == candidate || self.aliases.iter().any(|a| a == candidate)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchTables {
    #[serde(default)]
    pub salutations: Vec<String>,
    #[serde(default)]
    pub company_suffixes: Vec<String>,
    /// token → expansion; BTreeMap keeps iteration order stable.
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    #[serde(default)]
    pub company_aliases: Vec<AliasGroup>,
}

impl MatchTables {
    /// Tables shipped with the crate.
    pub fn builtin() -> &'static MatchTables {
        &BUILTIN
    }

    /// Parse and validate tables from TOML text.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let tables: MatchTables = toml::from_str(toml_str).context("parsing match tables")?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading match tables from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid match tables in {}", path.display()))
    }

    /// Resolve tables for the service:
    /// 1) `$KYC_TABLES_PATH` (must exist and parse)
    /// 2) `config/match_tables.toml` if present
    /// 3) the embedded defaults
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_TABLES_PATH) {
            let path = PathBuf::from(p);
            if !path.exists() {
                return Err(anyhow!(
                    "{ENV_TABLES_PATH} points to non-existent path {}",
                    path.display()
                ));
            }
            info!(target: "kyc", path = %path.display(), "loading match tables");
            return Self::from_path(&path);
        }
        let default_path = PathBuf::from(DEFAULT_TABLES_PATH);
        if default_path.exists() {
            info!(target: "kyc", path = %default_path.display(), "loading match tables");
            return Self::from_path(&default_path);
        }
        info!(target: "kyc", "using embedded match tables");
        Ok(Self::builtin().clone())
    }

    pub fn is_salutation(&self, token: &str) -> bool {
        self.salutations.iter().any(|s| s == token)
    }

    pub fn is_company_suffix(&self, token: &str) -> bool {
        self.company_suffixes.iter().any(|s| s == token)
    }

    pub fn expand(&self, token: &str) -> Option<&str> {
        self.abbreviations.get(token).map(String::as_str)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let lists = [
            ("salutations", &self.salutations),
            ("company_suffixes", &self.company_suffixes),
        ];
        for (label, list) in lists {
            for s in list.iter() {
                check_key(label, s)?;
            }
        }
        for (key, expansion) in &self.abbreviations {
            check_key("abbreviations", key)?;
            if expansion.trim().is_empty() {
                bail!("abbreviation `{key}` has an empty expansion");
            }
            if !expansion
                .chars()
                .all(|c| c.is_whitespace() || (c.is_alphanumeric() && !c.is_uppercase()))
            {
                bail!("abbreviation `{key}` expansion `{expansion}` must be lowercase letters, digits and spaces");
            }
            // An expansion token that is itself a key would make normalization
            // non-idempotent ("x" -> "y" -> "z").
            for tok in expansion.split_whitespace() {
                if self.abbreviations.contains_key(tok) {
                    bail!("abbreviation `{key}` expands to `{expansion}`, which contains key `{tok}`");
                }
            }
        }
        for group in &self.company_aliases {
            check_key("company_aliases.primary", &group.primary)?;
            for a in &group.aliases {
                if a.trim().is_empty() || a.to_lowercase() != *a {
                    bail!("alias `{a}` of `{}` must be non-empty lowercase", group.primary);
                }
            }
        }
        Ok(())
    }
}

impl Default for MatchTables {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn check_key(label: &str, key: &str) -> anyhow::Result<()> {
    if key.is_empty() || key.contains(char::is_whitespace) {
        bail!("{label}: `{key}` must be a single non-empty token");
    }
    if key.to_lowercase() != key {
        bail!("{label}: `{key}` must be lowercase");
    }
    Ok(())
}
