//! Record schemas, one fixed shape per variant.

use serde::{Deserialize, Serialize};

use ephinv_core::{CatalogNumber, DomainResult, Entity, Quantity};

use crate::cycle::Variant;
use crate::snapshot;

/// Shape shared by every inventory record schema.
///
/// `Entity::Id` is the identifier used for removal: the name in v1, the
/// catalog number in v2 and v3.
pub trait Record: Entity + Clone + core::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Which variant this schema models.
    const VARIANT: Variant;

    /// Human-readable table headers, in `row()` order.
    const COLUMNS: &'static [&'static str];

    /// Whether adds must carry a positive quantity.
    const TRACKS_QUANTITY: bool = false;

    /// Fresh copy of the literal seed list.
    fn snapshot() -> Vec<Self>;

    /// Construct a record from an already validated add request.
    ///
    /// Schemas without a catalog number or quantity ignore those arguments.
    fn build(catalog_number: CatalogNumber, name: String, quantity: Quantity) -> Self;

    /// Parse a removal identifier as submitted by the presentation layer.
    fn parse_id(raw: &str) -> DomainResult<Self::Id>;

    fn name(&self) -> &str;

    fn catalog_number(&self) -> Option<CatalogNumber> {
        None
    }

    fn quantity(&self) -> Option<Quantity> {
        None
    }

    /// Entry shown in the removal selection control.
    fn label(&self) -> String;

    /// Tabular projection of the record's fields.
    fn row(&self) -> Vec<String>;
}

// -------------------------
// v1: name only
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
}

impl Entity for NamedItem {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

impl Record for NamedItem {
    const VARIANT: Variant = Variant::V1;
    const COLUMNS: &'static [&'static str] = &["Item Name"];

    fn snapshot() -> Vec<Self> {
        snapshot::NAMED_ITEMS
            .iter()
            .map(|name| NamedItem {
                name: (*name).to_string(),
            })
            .collect()
    }

    fn build(_catalog_number: CatalogNumber, name: String, _quantity: Quantity) -> Self {
        NamedItem { name }
    }

    fn parse_id(raw: &str) -> DomainResult<Self::Id> {
        Ok(raw.to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

// -------------------------
// v2: catalog number + name
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub catalog_number: CatalogNumber,
    pub name: String,
}

impl Entity for CatalogItem {
    type Id = CatalogNumber;

    fn id(&self) -> &Self::Id {
        &self.catalog_number
    }
}

impl Record for CatalogItem {
    const VARIANT: Variant = Variant::V2;
    const COLUMNS: &'static [&'static str] = &["Catalog Number", "Item Name"];

    fn snapshot() -> Vec<Self> {
        snapshot::CATALOG_ITEMS
            .iter()
            .map(|(catalog_number, name)| CatalogItem {
                catalog_number: *catalog_number,
                name: (*name).to_string(),
            })
            .collect()
    }

    fn build(catalog_number: CatalogNumber, name: String, _quantity: Quantity) -> Self {
        CatalogItem {
            catalog_number,
            name,
        }
    }

    fn parse_id(raw: &str) -> DomainResult<Self::Id> {
        CatalogNumber::from_label(raw)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_number(&self) -> Option<CatalogNumber> {
        Some(self.catalog_number)
    }

    fn label(&self) -> String {
        format!("{} - {}", self.catalog_number, self.name)
    }

    fn row(&self) -> Vec<String> {
        vec![self.catalog_number.to_string(), self.name.clone()]
    }
}

// -------------------------
// v3: catalog number + name + quantity
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedItem {
    pub catalog_number: CatalogNumber,
    pub name: String,
    pub quantity: Quantity,
}

impl Entity for StockedItem {
    type Id = CatalogNumber;

    fn id(&self) -> &Self::Id {
        &self.catalog_number
    }
}

impl Record for StockedItem {
    const VARIANT: Variant = Variant::V3;
    const COLUMNS: &'static [&'static str] = &["Catalog Number", "Item Name", "Quantity Units"];
    const TRACKS_QUANTITY: bool = true;

    fn snapshot() -> Vec<Self> {
        snapshot::STOCKED_ITEMS
            .iter()
            .map(|seed| StockedItem {
                catalog_number: seed.catalog_number,
                name: seed.name.to_string(),
                quantity: seed.quantity,
            })
            .collect()
    }

    fn build(catalog_number: CatalogNumber, name: String, quantity: Quantity) -> Self {
        StockedItem {
            catalog_number,
            name,
            quantity,
        }
    }

    fn parse_id(raw: &str) -> DomainResult<Self::Id> {
        CatalogNumber::from_label(raw)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_number(&self) -> Option<CatalogNumber> {
        Some(self.catalog_number)
    }

    fn quantity(&self) -> Option<Quantity> {
        Some(self.quantity)
    }

    fn label(&self) -> String {
        format!("{} - {}", self.catalog_number, self.name)
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.catalog_number.to_string(),
            self.name.clone(),
            self.quantity.to_string(),
        ]
    }
}
