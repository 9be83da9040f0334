//! UI actions
//!
//! These never reach the store. The app turns them into controller calls,
//! and the controller turns those into [`shopping_list_core::ShoppingAction`]s.

use shopping_list_core::Action;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// The input text changed
    DraftChange(String),
    /// Submit the draft as a new item
    DraftSubmit,
    /// Move the list highlight
    ItemSelect(usize),
    /// Delete the item at this index
    ItemDelete(usize),
    FocusNext,
    FocusPrev,
    Quit,
}

impl Action for UiAction {
    fn name(&self) -> &'static str {
        match self {
            UiAction::DraftChange(_) => "DraftChange",
            UiAction::DraftSubmit => "DraftSubmit",
            UiAction::ItemSelect(_) => "ItemSelect",
            UiAction::ItemDelete(_) => "ItemDelete",
            UiAction::FocusNext => "FocusNext",
            UiAction::FocusPrev => "FocusPrev",
            UiAction::Quit => "Quit",
        }
    }
}
