use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Lifestyle attribute a neighborhood is rated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKey {
    Safety,
    Cafes,
    Parks,
    Schools,
    PublicTransport,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 5] = [
        AttributeKey::Safety,
        AttributeKey::Cafes,
        AttributeKey::Parks,
        AttributeKey::Schools,
        AttributeKey::PublicTransport,
    ];

    /// Wire name, as used in request bodies and record fields
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Safety => "safety",
            AttributeKey::Cafes => "cafes",
            AttributeKey::Parks => "parks",
            AttributeKey::Schools => "schools",
            AttributeKey::PublicTransport => "publicTransport",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a known attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown preference key '{}'", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for AttributeKey {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Stored neighborhood with its per-attribute ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodRecord {
    pub id: String,
    pub name: String,
    pub safety: f64,
    pub cafes: f64,
    pub parks: f64,
    pub schools: f64,
    #[serde(rename = "publicTransport")]
    pub public_transport: f64,
}

impl NeighborhoodRecord {
    /// Rating for a single attribute
    #[inline]
    pub fn attribute(&self, key: AttributeKey) -> f64 {
        match key {
            AttributeKey::Safety => self.safety,
            AttributeKey::Cafes => self.cafes,
            AttributeKey::Parks => self.parks,
            AttributeKey::Schools => self.schools,
            AttributeKey::PublicTransport => self.public_transport,
        }
    }
}

/// Record fields supplied at creation, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNeighborhood {
    pub name: String,
    pub safety: f64,
    pub cafes: f64,
    pub parks: f64,
    pub schools: f64,
    #[serde(rename = "publicTransport")]
    pub public_transport: f64,
}

impl NewNeighborhood {
    pub fn into_record(self, id: String) -> NeighborhoodRecord {
        NeighborhoodRecord {
            id,
            name: self.name,
            safety: self.safety,
            cafes: self.cafes,
            parks: self.parks,
            schools: self.schools,
            public_transport: self.public_transport,
        }
    }
}

/// Record augmented with the score computed for one request
///
/// Serializes flat: `{ id, name, safety, ..., publicTransport, score }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNeighborhood {
    #[serde(flatten)]
    pub record: NeighborhoodRecord,
    pub score: f64,
}

impl ScoredNeighborhood {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Set of attributes the user cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSelection {
    keys: BTreeSet<AttributeKey>,
}

impl PreferenceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.keys.contains(&key)
    }

    /// Add the key if absent, remove it if present
    pub fn toggle(&mut self, key: AttributeKey) {
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = AttributeKey> + '_ {
        self.keys.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<AttributeKey> {
        self.iter().collect()
    }
}

impl FromIterator<AttributeKey> for PreferenceSelection {
    fn from_iter<I: IntoIterator<Item = AttributeKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Criteria for reading records out of a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring the name must contain
    pub name_contains: Option<String>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn name_contains(needle: impl Into<String>) -> Self {
        Self {
            name_contains: Some(needle.into()),
        }
    }

    pub fn matches(&self, record: &NeighborhoodRecord) -> bool {
        match &self.name_contains {
            Some(needle) => crate::core::filters::name_matches(&record.name, needle),
            None => true,
        }
    }
}
