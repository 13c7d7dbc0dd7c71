//! Carrier vocabulary: raw tokens mapped to canonical display names
//!
//! The table is data, versioned on its own. A copy is bundled into the
//! binary; deployments can point `SPOTTY_CARRIERS_PATH` at a newer file.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_VOCABULARY: &str = include_str!("../../data/carriers.json");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Cannot read carrier vocabulary at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Carrier vocabulary is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Carrier vocabulary has no carriers")]
    Empty,
    #[error("Carrier {0:?} has a blank name or alias")]
    BlankEntry(String),
    #[error("Alias {alias:?} maps to both {first:?} and {second:?}")]
    Conflict {
        alias: String,
        first: String,
        second: String,
    },
    #[error("Failed to compile carrier pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    version: String,
    carriers: Vec<CarrierEntry>,
}

/// One carrier and the raw spellings that identify it
#[derive(Debug, Clone, Deserialize)]
pub struct CarrierEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Lookup table from normalized alias to canonical name
#[derive(Debug, Clone)]
pub struct Vocabulary {
    version: String,
    aliases: HashMap<String, String>,
    carrier_count: usize,
}

/// Lowercase and collapse internal whitespace so "Virgin   MOBILE" finds "virgin mobile"
pub fn normalize_alias(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Vocabulary {
    /// The table compiled into the binary
    pub fn bundled() -> Result<Self, VocabularyError> {
        Self::from_json(BUNDLED_VOCABULARY)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = serde_json::from_str(raw)?;
        Self::from_entries(file.version, file.carriers)
    }

    pub fn from_entries(
        version: impl Into<String>,
        entries: Vec<CarrierEntry>,
    ) -> Result<Self, VocabularyError> {
        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        for entry in &entries {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(VocabularyError::BlankEntry(entry.name.clone()));
            }

            // The display name always identifies itself
            for raw in std::iter::once(name).chain(entry.aliases.iter().map(String::as_str)) {
                let key = normalize_alias(raw);
                if key.is_empty() {
                    return Err(VocabularyError::BlankEntry(name.to_string()));
                }
                match aliases.get(&key) {
                    Some(existing) if existing != name => {
                        return Err(VocabularyError::Conflict {
                            alias: key,
                            first: existing.clone(),
                            second: name.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(key, name.to_string());
                    }
                }
            }
        }

        Ok(Self {
            version: version.into(),
            aliases,
            carrier_count: entries.len(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of distinct aliases
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn carrier_count(&self) -> usize {
        self.carrier_count
    }

    /// Canonical name for a raw token or phrase, if known
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        self.aliases.get(&normalize_alias(raw)).map(String::as_str)
    }

    /// Aliases made of more than one word, longest first
    pub fn multi_word_aliases(&self) -> Vec<(&str, &str)> {
        let mut multi: Vec<(&str, &str)> = self
            .aliases
            .iter()
            .filter(|(alias, _)| alias.contains(' '))
            .map(|(alias, name)| (alias.as_str(), name.as_str()))
            .collect();
        // Ties broken alphabetically so pattern order never depends on hashing
        multi.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        multi
    }
}
