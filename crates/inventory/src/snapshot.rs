//! Literal seed data.
//!
//! These lists are never mutated. Every interaction materializes its own copy
//! through `Record::snapshot()`, which is why additions and removals vanish
//! on the next interaction.

use ephinv_core::{quantity, CatalogNumber, Quantity};

/// Seed row for the quantity-tracking schema.
#[derive(Debug, Clone, Copy)]
pub struct StockedSeed {
    pub catalog_number: CatalogNumber,
    pub name: &'static str,
    pub quantity: Quantity,
}

pub static NAMED_ITEMS: &[&str] = &["Laptop", "Phone", "Headset"];

pub static CATALOG_ITEMS: &[(CatalogNumber, &str)] = &[
    (CatalogNumber::new(100_001), "Laptop"),
    (CatalogNumber::new(100_002), "Phone"),
    (CatalogNumber::new(100_003), "Headset"),
];

pub static STOCKED_ITEMS: &[StockedSeed] = &[
    StockedSeed {
        catalog_number: CatalogNumber::new(100_001),
        name: "Laptop",
        quantity: quantity(15),
    },
    StockedSeed {
        catalog_number: CatalogNumber::new(100_002),
        name: "Phone",
        quantity: quantity(50),
    },
    StockedSeed {
        catalog_number: CatalogNumber::new(100_003),
        name: "Headset",
        quantity: quantity(120),
    },
];
