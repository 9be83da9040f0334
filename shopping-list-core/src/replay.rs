//! Headless replay of intents from JSON Lines
//!
//! Each non-blank line holds one serialized [`ShoppingAction`]. Lines are
//! applied in order through a [`Store`], the same path the TUI uses.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, info};

use crate::intent::ShoppingAction;
use crate::item::ShoppingList;
use crate::reducer::reducer;
use crate::store::{LoggingMiddleware, Store};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read intents: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid intent: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a replay run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// List after the last intent
    pub items: ShoppingList,
    /// Intents applied, including no-ops
    pub applied: usize,
    /// Intents that changed the list
    pub changed: usize,
    /// Intents with a tag this version does not know
    pub unknown: usize,
}

/// Parse every intent in `reader`
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_intents<R: BufRead>(reader: R) -> Result<Vec<ShoppingAction>, ReplayError> {
    let mut intents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let intent = serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
            line: index + 1,
            source,
        })?;
        intents.push(intent);
    }
    Ok(intents)
}

/// Apply `intents` to `initial` in order
pub fn replay(initial: ShoppingList, intents: Vec<ShoppingAction>) -> ReplayReport {
    let mut store = Store::with_middleware(initial, reducer, LoggingMiddleware::new());
    let mut report = ReplayReport {
        items: Vec::new(),
        applied: 0,
        changed: 0,
        unknown: 0,
    };

    for intent in intents {
        if intent == ShoppingAction::Unknown {
            debug!("Applying unrecognized intent as a no-op");
            report.unknown += 1;
        }
        // Adds always grow the list and deletes only shrink it
        let before = store.state().len();
        store.dispatch(intent);
        if store.state().len() != before {
            report.changed += 1;
        }
        report.applied += 1;
    }

    report.items = store.state().clone();
    info!(
        applied = report.applied,
        changed = report.changed,
        unknown = report.unknown,
        items = report.items.len(),
        "Replay finished"
    );
    report
}

/// Parse and apply every intent in `reader`
pub fn replay_reader<R: BufRead>(
    initial: ShoppingList,
    reader: R,
) -> Result<ReplayReport, ReplayError> {
    Ok(replay(initial, parse_intents(reader)?))
}
