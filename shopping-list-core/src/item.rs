//! Shopping items and the list state they live in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the item every fresh list starts with
pub const SEED_ITEM_ID: &str = "1775933f";
/// Name of the item every fresh list starts with
pub const SEED_ITEM_NAME: &str = "Diet Coke";

/// Opaque item identity, assigned by whoever creates the item
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the placeholder id a draft carries before submission
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A named entry on the list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub name: String,
}

impl ShoppingItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identity-only reference to this item
    pub fn to_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id.clone(),
        }
    }
}

/// Identity-only payload used to address an item for deletion
///
/// Deserializing a full item into an `ItemRef` works too; the extra
/// fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
}

impl ItemRef {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&ShoppingItem> for ItemRef {
    fn from(item: &ShoppingItem) -> Self {
        item.to_ref()
    }
}

/// Ordered list state, insertion order
pub type ShoppingList = Vec<ShoppingItem>;

/// The list every process starts with
pub fn seed_list() -> ShoppingList {
    vec![ShoppingItem::new(SEED_ITEM_ID, SEED_ITEM_NAME)]
}
