//! Species identity
//!
//! Callers name species with free-form strings. [`SpeciesId`] folds those
//! strings to one canonical key (trimmed, lowercase) so that "Tiger",
//! "tiger" and " TIGER " all refer to the same species, while keeping the
//! first spelling it was created with for display.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, IdentityResult};

/// Longest name accepted by [`SpeciesId::parse`]
pub const MAX_NAME_LEN: usize = 128;

/// Species identifier
///
/// Equality, hashing and ordering only look at the canonical key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SpeciesId {
    display: String,
    key: String,
}

impl SpeciesId {
    /// Create an identifier from any name, without validation
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into().trim().to_string();
        let key = Self::fold(&display);
        Self { display, key }
    }

    /// Create an identifier, rejecting empty or oversized names
    pub fn parse(name: &str) -> IdentityResult<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(IdentityError::TooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self::new(trimmed))
    }

    /// Canonical form used for identity
    pub fn fold(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// The spelling this identifier was created with
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The canonical case-folded key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for SpeciesId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SpeciesId {}

impl Hash for SpeciesId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for SpeciesId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpeciesId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl From<String> for SpeciesId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SpeciesId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&SpeciesId> for SpeciesId {
    fn from(id: &SpeciesId) -> Self {
        id.clone()
    }
}

impl From<SpeciesId> for String {
    fn from(id: SpeciesId) -> Self {
        id.display
    }
}
