use thiserror::Error;

/// Failure to hand an intent to the store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The task owning the store has stopped receiving actions
    #[error("store is no longer accepting actions (dropped {action})")]
    StoreClosed { action: &'static str },
}
