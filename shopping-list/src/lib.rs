//! shopping-list: terminal frontend for the shopping list store
//!
//! The list itself lives in [`shopping_list_core`]. This crate adds the
//! screen ([`app::App`]), its components, keybindings, config loading, log
//! setup and terminal handling.

pub mod action;
pub mod app;
pub mod components;
pub mod config;
pub mod keybindings;
pub mod logging;
pub mod terminal;

pub use action::UiAction;
pub use app::{App, Focus};
pub use config::{Config, ConfigError};
pub use keybindings::{Command, KeyContext, Keybindings};
