pub mod help_bar;
pub mod item_list;
pub mod text_input;

// Re-export core Component trait
pub use shopping_list_core::Component;

pub use help_bar::{HelpBar, HelpBarProps};
pub use item_list::{ItemList, ItemListProps};
pub use text_input::{TextInput, TextInputProps};
