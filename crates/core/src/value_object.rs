//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects with the same values
//! are equal, and they are never modified in place.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Example: a `Quantity(15)` is interchangeable with any other `Quantity(15)`,
/// whereas two records are distinguished by their key.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Strictly positive stock quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

impl Quantity {
    /// Starting quantity offered by the input form.
    pub const DEFAULT: Quantity = Quantity(1);

    /// Validate raw user input. Zero and negative values are rejected.
    pub fn new(value: i64) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::InvalidQuantity(value));
        }
        Ok(Self(value as u64))
    }

    /// Construct from a literal known to be positive (seed data).
    pub(crate) const fn from_literal(value: u64) -> Self {
        Self(value)
    }

    pub fn units(self) -> u64 {
        self.0
    }
}

/// Build a quantity from compile-time seed data.
///
/// Panics at compile time (in `const` contexts) when given zero.
pub const fn quantity(units: u64) -> Quantity {
    assert!(units > 0, "seed quantity must be positive");
    Quantity::from_literal(units)
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
