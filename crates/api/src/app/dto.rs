use serde::Deserialize;

use ephinv_inventory::RawInteraction;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub identifier: Identifier,
}

/// Removal identifier: a name (v1), a catalog number, or a selection label
/// such as `"100002 - Phone"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(u64),
    Text(String),
}

impl Identifier {
    pub fn into_raw(self) -> String {
        match self {
            Identifier::Number(n) => n.to_string(),
            Identifier::Text(s) => s,
        }
    }
}

// -------------------------
// Mapping
// -------------------------

impl From<AddItemRequest> for RawInteraction {
    fn from(body: AddItemRequest) -> Self {
        RawInteraction::Add {
            name: body.name,
            quantity: body.quantity,
        }
    }
}

impl From<RemoveItemRequest> for RawInteraction {
    fn from(body: RemoveItemRequest) -> Self {
        RawInteraction::Remove {
            identifier: body.identifier.into_raw(),
        }
    }
}
