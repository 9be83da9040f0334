//! Core of the shopping list: store, intents, reducer and controller
//!
//! The list lives in a [`Store`] and changes only through
//! [`ShoppingAction`] intents applied by the pure [`transition`] function.
//! A [`ShoppingController`] turns user input into intents and watches the
//! list through a [`Selection`].
//!
//! # Core Concepts
//!
//! - **Intent**: tagged value describing a requested change (`AddItem`, `DeleteItem`)
//! - **Reducer**: pure function (list, intent) -> list
//! - **Store**: single owner of the list; publishes every change
//! - **Selection**: projected, change-notifying view of the store
//! - **Controller**: holds the draft item and dispatches intents
//!
//! # Example
//!
//! ```
//! use shopping_list_core::prelude::*;
//! use tokio::sync::mpsc;
//!
//! let mut store = Store::new(seed_list(), reducer);
//! let (action_tx, mut action_rx) = mpsc::unbounded_channel();
//! let mut controller = ShoppingController::new(&store, action_tx, SequentialIdGenerator::default());
//!
//! controller.set_draft_name("Milk");
//! controller.add_item().unwrap();
//!
//! // The task owning the store applies intents one at a time
//! while let Ok(action) = action_rx.try_recv() {
//!     store.dispatch(action);
//! }
//!
//! let names: Vec<_> = controller.items().into_iter().map(|item| item.name).collect();
//! assert_eq!(names, ["Diet Coke", "Milk"]);
//! ```

pub mod action;
pub mod component;
pub mod controller;
pub mod error;
pub mod event;
pub mod id;
pub mod intent;
pub mod item;
pub mod keys;
pub mod reducer;
pub mod replay;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionSummary};
pub use component::Component;

// Domain exports
pub use controller::ShoppingController;
pub use error::DispatchError;
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use intent::ShoppingAction;
pub use item::{seed_list, ItemId, ItemRef, ShoppingItem, ShoppingList};
pub use reducer::{reducer, transition};
pub use replay::{parse_intents, replay, replay_reader, ReplayError, ReplayReport};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Selection, Store};

// Event exports
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use keys::{format_key_for_display, key_matches, parse_key_string};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::component::Component;
    pub use crate::controller::ShoppingController;
    pub use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
    pub use crate::id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
    pub use crate::intent::ShoppingAction;
    pub use crate::item::{seed_list, ItemId, ItemRef, ShoppingItem, ShoppingList};
    pub use crate::reducer::{reducer, transition};
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Selection, Store,
    };
}
