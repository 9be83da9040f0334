//! Centralized state store with reducer pattern and change subscriptions
//!
//! The latest state sits in a [`tokio::sync::watch`] channel so any
//! [`Selection`] can read it at any time. Notifications are separate: every
//! dispatch the reducer reports is queued to each selection as its own
//! snapshot, in dispatch order. Only the store writes.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tokio::sync::{mpsc, watch};

use crate::action::{Action, ActionSummary};

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the action was a transition subscribers should hear
/// about, even when it left the state as it was.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the application state and provides a single point
/// for state mutations through the `dispatch` method. Dispatch takes
/// `&mut self`, so transitions are applied one at a time; share the
/// store between tasks by funnelling actions through a channel to the
/// task that owns it.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `M` - Middleware run around every dispatch
///
/// # Example
/// ```
/// use shopping_list_core::{reducer, seed_list, ItemRef, ShoppingAction, Store};
///
/// let mut store = Store::new(seed_list(), reducer);
/// let mut items = store.select(|list| list.len());
///
/// assert!(store.dispatch(ShoppingAction::DeleteItem(ItemRef::new("1775933f"))));
/// assert_eq!(items.get(), 0);
/// assert_eq!(items.poll_changed(), Some(0));
/// ```
pub struct Store<S, A: Action, M: Middleware<A> = NoopMiddleware> {
    state: watch::Sender<S>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<S>>>,
    reducer: Reducer<S, A>,
    middleware: M,
}

impl<S: Clone, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S: Clone, A: Action, M: Middleware<A>> Store<S, A, M> {
    /// Create a new store whose dispatches pass through `middleware`
    pub fn with_middleware(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            state: watch::Sender::new(state),
            subscribers: Mutex::new(Vec::new()),
            reducer,
            middleware,
        }
    }

    /// Dispatch an action to the store
    ///
    /// The reducer will be called with the current state and action.
    /// When it returns `true`, every selection receives exactly one
    /// notification carrying the resulting state.
    /// Returns the reducer's verdict.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let reducer = self.reducer;
        let seen = action.clone();
        let notify = self.state.send_if_modified(|state| reducer(state, action));
        if notify {
            self.publish();
        }
        self.middleware.after(&seen, notify);
        notify
    }

    fn publish(&mut self) {
        let snapshot = self.state.borrow().clone();
        self.subscribers
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    /// Get a read guard on the current state
    ///
    /// Drop the guard before dispatching again.
    pub fn state(&self) -> watch::Ref<'_, S> {
        self.state.borrow()
    }

    /// Subscribe to a projection of the state
    ///
    /// The selection yields the projected value immediately via
    /// [`Selection::get`] and then one notification per later transition.
    pub fn select<T, F>(&self, projector: F) -> Selection<S, T>
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Selection {
            latest: self.state.subscribe(),
            updates: rx,
            projector: Box::new(projector),
        }
    }

    /// Number of live selections
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// A live, projected view of store state
///
/// [`Selection::get`] always reads the latest state. Notifications queue
/// up one per transition and are observed in dispatch order through
/// [`Selection::poll_changed`] or [`Selection::changed`]; none are merged
/// or dropped while the selection is alive.
pub struct Selection<S, T> {
    latest: watch::Receiver<S>,
    updates: mpsc::UnboundedReceiver<S>,
    projector: Box<dyn Fn(&S) -> T + Send + Sync>,
}

impl<S, T> fmt::Debug for Selection<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("pending", &self.pending())
            .finish()
    }
}

impl<S, T> Selection<S, T> {
    /// Project the current state
    pub fn get(&self) -> T {
        (self.projector)(&self.latest.borrow())
    }

    /// Number of notifications not yet observed
    pub fn pending(&self) -> usize {
        self.updates.len()
    }

    /// Whether a notification is waiting to be observed
    pub fn has_changed(&self) -> bool {
        !self.updates.is_empty()
    }

    /// Observe the oldest pending notification without waiting
    ///
    /// Returns the projection of the state that transition produced.
    pub fn poll_changed(&mut self) -> Option<T> {
        let state = self.updates.try_recv().ok()?;
        Some((self.projector)(&state))
    }

    /// Wait for the next notification and return its projection
    ///
    /// Returns `None` once the store has been dropped and every queued
    /// notification was observed.
    pub async fn changed(&mut self) -> Option<T> {
        let state = self.updates.recv().await?;
        Some((self.projector)(&state))
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns
/// to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, notified: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _notified: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), summary = %action.summary(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, notified: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                notified,
                "Action processed"
            );
        }
    }
}
