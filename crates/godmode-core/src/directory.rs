//! Creator directory: the read-only id → invite record table.
//!
//! The directory is a JSON object keyed by creator id:
//!
//! ```json
//! {
//!   "antonio": {
//!     "name": "Antonio",
//!     "vip_code": "GODMODE-VIP-2026-ANT001",
//!     "community_codes": ["GM-26-ALPHA", "GM-26-BRAVO"]
//!   }
//! }
//! ```
//!
//! Keys are lowercased at load time and lookups lowercase the requested id,
//! so `?id=ANTONIO` and `?id=antonio` resolve to the same record.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single creator's invite record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRecord {
    /// Display name, as entered by whoever maintains the directory.
    pub name: String,

    /// The creator's own redemption code. Opaque; never validated here.
    pub vip_code: String,

    /// Ordered share codes handed out to the creator's community.
    #[serde(default)]
    pub community_codes: Vec<String>,
}

impl CreatorRecord {
    /// Display name with its first letter upper-cased ("antonio" → "Antonio").
    pub fn display_name(&self) -> String {
        capitalize_first(&self.name)
    }
}

/// In-memory creator directory.
#[derive(Debug, Clone, Default)]
pub struct CreatorDirectory {
    records: HashMap<String, CreatorRecord>,
}

impl CreatorDirectory {
    /// Build a directory from `(id, record)` pairs. Ids are lowercased.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, CreatorRecord)>,
    {
        let records = records
            .into_iter()
            .map(|(id, record)| (id.to_lowercase(), record))
            .collect();
        Self { records }
    }

    /// Parse a directory from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, CreatorRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(raw))
    }

    /// Parse a directory from raw JSON bytes (e.g. an HTTP response body).
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: HashMap<String, CreatorRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(raw))
    }

    /// Load a directory from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let directory = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            creators = directory.len(),
            "creator directory loaded"
        );
        Ok(directory)
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, id: &str) -> Option<&CreatorRecord> {
        self.records.get(&id.to_lowercase())
    }

    /// Number of creators in the directory.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no creators.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Upper-case the first character of `s`, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
