//! Test utilities for the shopping list
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+d")`)
//! - [`TestHarness`]: action channel capture plus a store to pump into
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```
//! use shopping_list_core::testing::TestHarness;
//! use shopping_list_core::{seed_list, ItemRef, ShoppingAction};
//!
//! let mut harness = TestHarness::new(seed_list());
//! harness.emit(ShoppingAction::DeleteItem(ItemRef::new("1775933f")));
//!
//! assert_eq!(harness.pump(), 1);
//! assert!(harness.store.state().is_empty());
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;

use crate::intent::ShoppingAction;
use crate::item::ShoppingList;
use crate::keys::parse_key_string;
use crate::reducer::reducer;
use crate::store::Store;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// One `KeyEvent` per character of `text`, for typing into inputs.
pub fn type_text(text: &str) -> Vec<KeyEvent> {
    text.chars().map(char_key).collect()
}

/// A store wired to an action channel, the way the app wires it.
///
/// Hand [`TestHarness::sender`] to controllers, then call
/// [`TestHarness::pump`] to apply whatever they sent.
pub struct TestHarness {
    /// The store under test
    pub store: Store<ShoppingList, ShoppingAction>,
    tx: mpsc::UnboundedSender<ShoppingAction>,
    rx: mpsc::UnboundedReceiver<ShoppingAction>,
}

impl TestHarness {
    /// Create a harness around a store seeded with `initial`.
    pub fn new(initial: ShoppingList) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(initial, reducer),
            tx,
            rx,
        }
    }

    /// Get a clone of the action sender for passing to controllers.
    pub fn sender(&self) -> mpsc::UnboundedSender<ShoppingAction> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a controller would do).
    pub fn emit(&self, action: ShoppingAction) {
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions without applying them.
    pub fn drain_emitted(&mut self) -> Vec<ShoppingAction> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Apply every pending action to the store, in order.
    ///
    /// Returns how many of them notified subscribers.
    pub fn pump(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(action) = self.rx.try_recv() {
            if self.store.dispatch(action) {
                changed += 1;
            }
        }
        changed
    }
}

/// Renders into a `TestBackend` so output can be asserted as text.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Render a frame and return the raw buffer.
    pub fn render<F: FnOnce(&mut Frame)>(&mut self, f: F) -> Buffer {
        let completed = self
            .terminal
            .draw(f)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {}", e));
        completed.buffer.clone()
    }

    /// Render a frame and return its text, one line per row, styling dropped.
    pub fn render_to_string_plain<F: FnOnce(&mut Frame)>(&mut self, f: F) -> String {
        let buffer = self.render(f);
        buffer_to_string_plain(&buffer)
    }
}

/// Buffer contents as plain text with trailing spaces trimmed per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Plain text for one region of a buffer.
pub fn buffer_rect_to_string_plain(buffer: &Buffer, area: Rect) -> String {
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.y..area.y.saturating_add(area.height) {
        let mut line = String::new();
        for x in area.x..area.x.saturating_add(area.width) {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, ShoppingAction::AddItem(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
