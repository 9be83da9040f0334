//! Shopping intents
//!
//! Intents are the only way the list changes. They serialize as JSON
//! objects tagged by `type`, with the payload fields inline:
//!
//! ```json
//! {"type": "[Shopping] Add Item", "id": "abc", "name": "Milk"}
//! {"type": "[Shopping] Delete Item", "id": "abc"}
//! ```
//!
//! Tags this version does not know decode to [`ShoppingAction::Unknown`],
//! which the reducer treats as a no-op.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionSummary};
use crate::item::{ItemRef, ShoppingItem};

pub const ADD_ITEM_TAG: &str = "[Shopping] Add Item";
pub const DELETE_ITEM_TAG: &str = "[Shopping] Delete Item";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShoppingAction {
    /// Append an item to the end of the list
    #[serde(rename = "[Shopping] Add Item")]
    AddItem(ShoppingItem),

    /// Remove every item whose id matches
    #[serde(rename = "[Shopping] Delete Item")]
    DeleteItem(ItemRef),

    /// An intent from a newer producer
    #[serde(other)]
    Unknown,
}

impl ShoppingAction {
    /// Wire tag for this intent, `None` for [`ShoppingAction::Unknown`]
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ShoppingAction::AddItem(_) => Some(ADD_ITEM_TAG),
            ShoppingAction::DeleteItem(_) => Some(DELETE_ITEM_TAG),
            ShoppingAction::Unknown => None,
        }
    }
}

impl Action for ShoppingAction {
    fn name(&self) -> &'static str {
        match self {
            ShoppingAction::AddItem(_) => "AddItem",
            ShoppingAction::DeleteItem(_) => "DeleteItem",
            ShoppingAction::Unknown => "Unknown",
        }
    }
}

impl ActionSummary for ShoppingAction {
    fn summary(&self) -> String {
        match self {
            ShoppingAction::AddItem(item) => {
                format!("AddItem {{ id: {}, name: {:?} }}", item.id, item.name)
            }
            ShoppingAction::DeleteItem(item_ref) => format!("DeleteItem {{ id: {} }}", item_ref.id),
            ShoppingAction::Unknown => "Unknown".to_string(),
        }
    }
}
