//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Six-digit catalog number assigned to a record when it is created.
///
/// Catalog numbers are unique within a store and increase monotonically,
/// but only within a single interaction cycle (the store is re-seeded
/// afterwards).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogNumber(u64);

impl CatalogNumber {
    /// Number handed out when the store is empty.
    pub const FIRST: CatalogNumber = CatalogNumber(100_001);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The number that follows `self`, or `None` once the range is exhausted.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse either plain digits (`"100002"`) or a selection label
    /// (`"100002 - Phone"`).
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        let head = label.split_once(" - ").map_or(label, |(head, _)| head);
        head.parse()
    }
}

impl core::fmt::Display for CatalogNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for CatalogNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CatalogNumber> for u64 {
    fn from(value: CatalogNumber) -> Self {
        value.0
    }
}

impl FromStr for CatalogNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("CatalogNumber '{}': {}", s, e)))?;
        Ok(Self(value))
    }
}
