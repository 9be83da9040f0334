//! Item id generation

use crate::item::ItemId;

/// Source of fresh item ids
///
/// Implementations must make collisions with ids already in use
/// overwhelmingly unlikely. Callers that can see the current list may
/// still retry on collision.
pub trait IdGenerator {
    fn generate(&mut self) -> ItemId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self) -> ItemId {
        (**self).generate()
    }
}

/// Random v4 UUIDs, hyphenated
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> ItemId {
        ItemId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic ids `{prefix}{n}` counting up from 1
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("item-")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self) -> ItemId {
        let id = ItemId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
