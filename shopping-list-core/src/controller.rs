//! View controller: draft handling, intent dispatch and the live list
//!
//! The controller never touches the store directly. It sends intents over
//! the action channel to whichever task owns the [`Store`], and watches the
//! list through a [`Selection`].

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::DispatchError;
use crate::id::IdGenerator;
use crate::intent::ShoppingAction;
use crate::item::{ItemId, ItemRef, ShoppingItem, ShoppingList};
use crate::store::{Middleware, Selection, Store};

/// How many times to redraw an id that collides with a listed item
const MAX_ID_ATTEMPTS: usize = 8;

/// Bridges user input to shopping intents
pub struct ShoppingController<G: IdGenerator> {
    draft: ShoppingItem,
    ids: G,
    action_tx: mpsc::UnboundedSender<ShoppingAction>,
    items: Selection<ShoppingList, ShoppingList>,
}

impl<G: IdGenerator> ShoppingController<G> {
    /// Create a controller subscribed to `store`'s list
    pub fn new<M: Middleware<ShoppingAction>>(
        store: &Store<ShoppingList, ShoppingAction, M>,
        action_tx: mpsc::UnboundedSender<ShoppingAction>,
        ids: G,
    ) -> Self {
        Self::from_selection(store.select(|list| list.clone()), action_tx, ids)
    }

    /// Create a controller from an existing list selection
    pub fn from_selection(
        items: Selection<ShoppingList, ShoppingList>,
        action_tx: mpsc::UnboundedSender<ShoppingAction>,
        ids: G,
    ) -> Self {
        Self {
            draft: ShoppingItem::default(),
            ids,
            action_tx,
            items,
        }
    }

    /// The item being composed
    pub fn draft(&self) -> &ShoppingItem {
        &self.draft
    }

    /// Replace the draft's name with user input
    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Submit the draft
    ///
    /// Gives the draft a fresh id, dispatches it, and starts a new empty
    /// draft. The name is not validated. If the store is gone the draft
    /// keeps its name and stays without an id.
    pub fn add_item(&mut self) -> Result<ShoppingItem, DispatchError> {
        let id = self.fresh_id();
        let item = ShoppingItem {
            id,
            name: self.draft.name.clone(),
        };

        self.send(ShoppingAction::AddItem(item.clone()))?;
        debug!(id = %item.id, "Draft submitted");
        self.draft = ShoppingItem::default();
        Ok(item)
    }

    /// Ask the store to remove every item sharing `item`'s id
    pub fn delete_item(&self, item: impl Into<ItemRef>) -> Result<(), DispatchError> {
        self.send(ShoppingAction::DeleteItem(item.into()))
    }

    /// Current list as last published by the store
    pub fn items(&self) -> ShoppingList {
        self.items.get()
    }

    /// The list produced by the oldest transition not yet observed
    pub fn poll_changed(&mut self) -> Option<ShoppingList> {
        self.items.poll_changed()
    }

    /// Wait for the next transition and return the list it produced
    pub async fn changed(&mut self) -> Option<ShoppingList> {
        self.items.changed().await
    }

    fn fresh_id(&mut self) -> ItemId {
        let listed = self.items.get();
        let mut id = self.ids.generate();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !listed.iter().any(|item| item.id == id) {
                return id;
            }
            id = self.ids.generate();
        }
        if listed.iter().any(|item| item.id == id) {
            warn!(%id, "Id generator kept colliding; submitting a duplicate id");
        }
        id
    }

    fn send(&self, action: ShoppingAction) -> Result<(), DispatchError> {
        let name = action.name();
        self.action_tx
            .send(action)
            .map_err(|_| DispatchError::StoreClosed { action: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::item::seed_list;
    use crate::reducer::reducer;

    type TestStore = Store<ShoppingList, ShoppingAction>;

    fn setup() -> (
        TestStore,
        mpsc::UnboundedReceiver<ShoppingAction>,
        ShoppingController<SequentialIdGenerator>,
    ) {
        let store = Store::new(seed_list(), reducer);
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = ShoppingController::new(&store, tx, SequentialIdGenerator::new("id-"));
        (store, rx, controller)
    }

    fn pump(store: &mut TestStore, rx: &mut mpsc::UnboundedReceiver<ShoppingAction>) {
        while let Ok(action) = rx.try_recv() {
            store.dispatch(action);
        }
    }

    #[test]
    fn test_draft_starts_empty() {
        let (_store, _rx, controller) = setup();
        assert_eq!(controller.draft(), &ShoppingItem::default());
        assert_eq!(controller.items(), seed_list());
    }

    #[test]
    fn test_add_item_assigns_id_and_resets_draft() {
        let (mut store, mut rx, mut controller) = setup();

        controller.set_draft_name("Milk");
        let added = controller.add_item().unwrap();

        assert_eq!(added, ShoppingItem::new("id-1", "Milk"));
        assert_eq!(controller.draft(), &ShoppingItem::default());

        pump(&mut store, &mut rx);
        assert_eq!(
            controller.poll_changed(),
            Some(vec![
                ShoppingItem::new("1775933f", "Diet Coke"),
                ShoppingItem::new("id-1", "Milk"),
            ])
        );
    }

    #[test]
    fn test_add_item_accepts_empty_name() {
        let (mut store, mut rx, mut controller) = setup();

        let added = controller.add_item().unwrap();
        assert_eq!(added.name, "");

        pump(&mut store, &mut rx);
        assert_eq!(controller.items().len(), 2);
    }

    #[test]
    fn test_delete_item_dispatches_identity_only() {
        let (mut store, mut rx, mut controller) = setup();

        controller
            .delete_item(&ShoppingItem::new("1775933f", "whatever"))
            .unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            ShoppingAction::DeleteItem(ItemRef::new("1775933f"))
        );

        controller.delete_item(ItemRef::new("1775933f")).unwrap();
        pump(&mut store, &mut rx);
        assert_eq!(controller.poll_changed(), Some(Vec::new()));
    }

    #[test]
    fn test_one_notification_per_transition() {
        let (mut store, mut rx, mut controller) = setup();

        controller.delete_item(ItemRef::new("nonexistent")).unwrap();
        pump(&mut store, &mut rx);
        assert_eq!(controller.poll_changed(), Some(seed_list()));
        assert_eq!(controller.poll_changed(), None);

        controller.set_draft_name("Eggs");
        controller.add_item().unwrap();
        controller.set_draft_name("Milk");
        controller.add_item().unwrap();
        pump(&mut store, &mut rx);

        let first = controller.poll_changed().unwrap();
        let second = controller.poll_changed().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 3);
        assert_eq!(controller.poll_changed(), None);
    }

    #[test]
    fn test_fresh_id_skips_listed_ids() {
        let mut store = Store::new(
            vec![
                ShoppingItem::new("id-1", "Taken"),
                ShoppingItem::new("id-2", "Also taken"),
            ],
            reducer,
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut controller =
            ShoppingController::new(&store, tx, SequentialIdGenerator::new("id-"));

        controller.set_draft_name("Fresh");
        let added = controller.add_item().unwrap();
        assert_eq!(added.id.as_str(), "id-3");

        pump(&mut store, &mut rx);
        assert_eq!(store.state().len(), 3);
    }

    #[test]
    fn test_add_item_with_store_gone_keeps_draft() {
        let (_store, rx, mut controller) = setup();
        drop(rx);

        controller.set_draft_name("Milk");
        let err = controller.add_item().unwrap_err();

        assert_eq!(err, DispatchError::StoreClosed { action: "AddItem" });
        assert_eq!(controller.draft().name, "Milk");
        assert!(controller.draft().id.is_empty());
    }
}
