//! List reducer - pure function: (list, intent) -> list
//!
//! [`transition`] never touches its input; it builds the next list.
//! [`reducer`] adapts it to the store's `fn(&mut S, A) -> bool` shape and
//! reports which intents subscribers should hear about.

use crate::intent::ShoppingAction;
use crate::item::{ShoppingItem, ShoppingList};

/// Compute the list that results from applying `action` to `state`
///
/// - `AddItem` appends, even when the id is already present.
/// - `DeleteItem` drops every item with a matching id; no match is a no-op.
/// - `Unknown` returns the list unchanged.
pub fn transition(state: &[ShoppingItem], action: &ShoppingAction) -> ShoppingList {
    match action {
        ShoppingAction::AddItem(item) => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend_from_slice(state);
            next.push(item.clone());
            next
        }
        ShoppingAction::DeleteItem(item_ref) => state
            .iter()
            .filter(|item| item.id != item_ref.id)
            .cloned()
            .collect(),
        ShoppingAction::Unknown => state.to_vec(),
    }
}

/// Store reducer for the list slice
///
/// Every add or delete is a transition and returns `true`, a delete that
/// matched nothing included. Unrecognised intents return `false` and leave
/// subscribers alone.
pub fn reducer(state: &mut ShoppingList, action: ShoppingAction) -> bool {
    if matches!(action, ShoppingAction::Unknown) {
        return false;
    }
    *state = transition(state, &action);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{seed_list, ItemRef};
    use proptest::prelude::*;

    fn add(id: &str, name: &str) -> ShoppingAction {
        ShoppingAction::AddItem(ShoppingItem::new(id, name))
    }

    fn delete(id: &str) -> ShoppingAction {
        ShoppingAction::DeleteItem(ItemRef::new(id))
    }

    #[test]
    fn test_add_then_delete_scenario() {
        let state = seed_list();

        let state = transition(&state, &add("abc", "Milk"));
        assert_eq!(
            state,
            vec![
                ShoppingItem::new("1775933f", "Diet Coke"),
                ShoppingItem::new("abc", "Milk"),
            ]
        );

        let state = transition(&state, &delete("1775933f"));
        assert_eq!(state, vec![ShoppingItem::new("abc", "Milk")]);
    }

    #[test]
    fn test_delete_nonexistent_leaves_seed() {
        let seed = seed_list();
        let state = transition(&seed, &delete("nonexistent"));
        assert_eq!(state, seed);
    }

    #[test]
    fn test_unknown_is_identity() {
        let states = [
            Vec::new(),
            seed_list(),
            vec![
                ShoppingItem::new("a", "Eggs"),
                ShoppingItem::new("a", "Eggs again"),
            ],
        ];
        for state in &states {
            assert_eq!(&transition(state, &ShoppingAction::Unknown), state);
        }
    }

    #[test]
    fn test_add_appends_at_end() {
        let seed = seed_list();
        let item = ShoppingItem::new("xyz", "Bread");
        let state = transition(&seed, &ShoppingAction::AddItem(item.clone()));

        assert_eq!(state.len(), seed.len() + 1);
        assert_eq!(state.last(), Some(&item));
    }

    #[test]
    fn test_add_keeps_duplicate_ids() {
        let state = transition(&seed_list(), &add("1775933f", "Diet Coke"));
        assert_eq!(state.len(), 2);
        assert!(state.iter().all(|item| item.id.as_str() == "1775933f"));
    }

    #[test]
    fn test_delete_removes_every_match() {
        let state = vec![
            ShoppingItem::new("dup", "One"),
            ShoppingItem::new("keep", "Two"),
            ShoppingItem::new("dup", "Three"),
        ];
        let state = transition(&state, &delete("dup"));
        assert_eq!(state, vec![ShoppingItem::new("keep", "Two")]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let state = vec![
            ShoppingItem::new("a", "Apples"),
            ShoppingItem::new("b", "Bananas"),
        ];
        for id in ["a", "b", "missing"] {
            let once = transition(&state, &delete(id));
            let twice = transition(&once, &delete(id));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_delete_matches_id_only() {
        let state = vec![ShoppingItem::new("a", "Apples")];
        let payload = ShoppingItem::new("a", "Completely different name");
        let state = transition(&state, &ShoppingAction::DeleteItem(payload.to_ref()));
        assert!(state.is_empty());
    }

    #[test]
    fn test_adds_preserve_dispatch_order() {
        let names = ["Milk", "Eggs", "Flour", "Butter"];
        let mut state = Vec::new();
        for (i, name) in names.iter().enumerate() {
            state = transition(&state, &add(&i.to_string(), name));
        }
        let got: Vec<_> = state.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn test_transition_does_not_touch_input() {
        let seed = seed_list();
        let snapshot = seed.clone();
        let _ = transition(&seed, &delete("1775933f"));
        assert_eq!(seed, snapshot);
    }

    #[test]
    fn test_reducer_notifies_every_transition() {
        let mut state = seed_list();

        assert!(reducer(&mut state, add("abc", "Milk")));
        assert_eq!(state.len(), 2);

        assert!(reducer(&mut state, delete("missing")));
        assert_eq!(state.len(), 2);

        assert!(!reducer(&mut state, ShoppingAction::Unknown));
        assert_eq!(state.len(), 2);

        assert!(reducer(&mut state, delete("abc")));
        assert_eq!(state, seed_list());
    }

    // === Property tests =====================================================

    // Ids come from a tiny alphabet so lists often hold duplicates
    const ID: &str = "[a-c]{1,2}";

    fn item() -> impl Strategy<Value = ShoppingItem> {
        (ID, "[A-Za-z ]{0,8}").prop_map(|(id, name)| ShoppingItem::new(id, name))
    }

    fn list() -> impl Strategy<Value = ShoppingList> {
        prop::collection::vec(item(), 0..8)
    }

    fn action() -> impl Strategy<Value = ShoppingAction> {
        prop_oneof![
            item().prop_map(ShoppingAction::AddItem),
            ID.prop_map(|id| ShoppingAction::DeleteItem(ItemRef::new(id))),
            Just(ShoppingAction::Unknown),
        ]
    }

    proptest! {
        #[test]
        fn prop_unknown_is_identity(state in list()) {
            prop_assert_eq!(transition(&state, &ShoppingAction::Unknown), state);
        }

        #[test]
        fn prop_delete_is_idempotent(state in list(), id in ID) {
            let once = transition(&state, &delete(&id));
            let twice = transition(&once, &delete(&id));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_add_appends(state in list(), new_item in item()) {
            let next = transition(&state, &ShoppingAction::AddItem(new_item.clone()));
            prop_assert_eq!(next.len(), state.len() + 1);
            prop_assert_eq!(next.last(), Some(&new_item));
            prop_assert_eq!(&next[..state.len()], &state[..]);
        }

        #[test]
        fn prop_delete_removes_every_match(state in list(), id in ID) {
            let next = transition(&state, &delete(&id));
            let kept: Vec<_> = state.iter().filter(|i| i.id.as_str() != id).cloned().collect();
            prop_assert!(next.iter().all(|i| i.id.as_str() != id));
            prop_assert_eq!(next, kept);
        }

        #[test]
        fn prop_adds_preserve_dispatch_order(items in prop::collection::vec(item(), 0..12)) {
            let state = items.iter().fold(Vec::new(), |state, it| {
                transition(&state, &ShoppingAction::AddItem(it.clone()))
            });
            prop_assert_eq!(state, items);
        }

        #[test]
        fn prop_reducer_follows_transition(
            initial in list(),
            actions in prop::collection::vec(action(), 0..12),
        ) {
            let mut state = initial;
            for action in actions {
                let expected = transition(&state, &action);
                let notified = reducer(&mut state, action.clone());
                prop_assert_eq!(notified, action != ShoppingAction::Unknown);
                prop_assert_eq!(&state, &expected);
            }
        }
    }
}
