//! One interaction pass: seed, mutate at most once, render, discard.
//!
//! Nothing survives a pass. Every call rebuilds the store from the literal
//! snapshot, so an item added in one pass is gone in the next.

use core::str::FromStr;

use serde::Serialize;

use ephinv_core::{DomainError, DomainResult};

use crate::record::{CatalogItem, NamedItem, Record, StockedItem};
use crate::store::Store;
use crate::view::InventoryView;

/// The single mutation (if any) requested by the triggering interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction<K> {
    /// Plain re-render (e.g. a selection change).
    None,
    Add { name: String, quantity: Option<i64> },
    Remove { id: K },
}

/// Interaction as submitted by a presentation layer, before the identifier
/// is parsed for a concrete schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInteraction {
    None,
    Add { name: String, quantity: Option<i64> },
    Remove { identifier: String },
}

/// Which record schema a pass operates on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Name only; removal by name.
    V1,
    /// Catalog number + name; removal by catalog number.
    V2,
    /// Catalog number + name + quantity; removal by catalog number.
    V3,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::V1, Variant::V2, Variant::V3];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::V1 => "v1",
            Variant::V2 => "v2",
            Variant::V3 => "v3",
        }
    }

    /// Run one pass for this variant.
    ///
    /// Only a malformed removal identifier fails here; domain outcomes are
    /// reported through the view's notifications.
    pub fn render(self, interaction: RawInteraction) -> DomainResult<InventoryView> {
        match self {
            Variant::V1 => Ok(render_cycle::<NamedItem>(typed::<NamedItem>(interaction)?)),
            Variant::V2 => Ok(render_cycle::<CatalogItem>(typed::<CatalogItem>(interaction)?)),
            Variant::V3 => Ok(render_cycle::<StockedItem>(typed::<StockedItem>(interaction)?)),
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::invalid_id(format!("unknown variant '{s}'")))
    }
}

fn typed<R: Record>(raw: RawInteraction) -> DomainResult<Interaction<R::Id>> {
    Ok(match raw {
        RawInteraction::None => Interaction::None,
        RawInteraction::Add { name, quantity } => Interaction::Add { name, quantity },
        RawInteraction::Remove { identifier } => Interaction::Remove {
            id: R::parse_id(&identifier)?,
        },
    })
}

/// Execute one full interaction pass for schema `R`.
///
/// 1. reconstruct the store from its literal snapshot
/// 2. apply the requested mutation, if any
/// 3. render the resulting view
/// 4. drop the store
pub fn render_cycle<R: Record>(interaction: Interaction<R::Id>) -> InventoryView {
    let variant = R::VARIANT;
    let span = tracing::info_span!("render_cycle", %variant);
    let _guard = span.enter();

    let mut store = Store::<R>::from_snapshot();

    // Failures are already recorded as notifications on the store.
    match interaction {
        Interaction::None => {}
        Interaction::Add { name, quantity } => {
            let _ = store.add_item(&name, quantity);
        }
        Interaction::Remove { id } => {
            let _ = store.remove_item(&id);
        }
    }

    let view = InventoryView::render(&mut store);
    tracing::debug!(records = view.record_count, "rendered");
    view
}
