//! End-to-end list flows through the public API

use shopping_list_core::testing::TestHarness;
use shopping_list_core::{
    assert_emitted, assert_not_emitted, parse_intents, replay, seed_list, ItemRef,
    SequentialIdGenerator, ShoppingAction, ShoppingController, ShoppingItem, Store,
};
use tokio::sync::mpsc;

fn names(items: &[ShoppingItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[test]
fn test_controller_add_then_delete_seed() {
    let mut harness = TestHarness::new(seed_list());
    let mut controller = ShoppingController::new(
        &harness.store,
        harness.sender(),
        SequentialIdGenerator::new("abc-"),
    );

    controller.set_draft_name("Milk");
    let milk = controller.add_item().unwrap();
    assert_eq!(milk, ShoppingItem::new("abc-1", "Milk"));
    harness.pump();
    assert_eq!(names(&controller.items()), ["Diet Coke", "Milk"]);

    controller.delete_item(ItemRef::new("1775933f")).unwrap();
    harness.pump();
    assert_eq!(controller.items(), vec![milk]);
}

#[test]
fn test_controller_emits_tagged_intents() {
    let mut harness = TestHarness::new(seed_list());
    let mut controller = ShoppingController::new(
        &harness.store,
        harness.sender(),
        SequentialIdGenerator::default(),
    );

    controller.set_draft_name("Eggs");
    controller.add_item().unwrap();
    let seed = seed_list();
    controller.delete_item(&seed[0]).unwrap();

    let emitted = harness.drain_emitted();
    assert_eq!(emitted.len(), 2);
    assert_emitted!(emitted, ShoppingAction::AddItem(item) if item.name == "Eggs");
    assert_emitted!(emitted, ShoppingAction::DeleteItem(r) if r.id.as_str() == "1775933f");
    assert_not_emitted!(emitted, ShoppingAction::Unknown);
}

#[test]
fn test_two_controllers_share_one_list() {
    let mut harness = TestHarness::new(Vec::new());
    let mut first = ShoppingController::new(
        &harness.store,
        harness.sender(),
        SequentialIdGenerator::new("a-"),
    );
    let mut second = ShoppingController::new(
        &harness.store,
        harness.sender(),
        SequentialIdGenerator::new("b-"),
    );

    first.set_draft_name("Bread");
    first.add_item().unwrap();
    second.set_draft_name("Butter");
    second.add_item().unwrap();
    assert_eq!(harness.pump(), 2);

    assert_eq!(first.poll_changed(), second.poll_changed());
    assert_eq!(names(&second.items()), ["Bread", "Butter"]);
}

#[test]
fn test_every_transition_reaches_the_controller() {
    let mut harness = TestHarness::new(seed_list());
    let mut controller = ShoppingController::new(
        &harness.store,
        harness.sender(),
        SequentialIdGenerator::new("n-"),
    );

    controller.delete_item(ItemRef::new("nonexistent")).unwrap();
    harness.pump();
    assert_eq!(controller.poll_changed(), Some(seed_list()));

    controller.set_draft_name("Milk");
    controller.add_item().unwrap();
    controller.set_draft_name("Eggs");
    controller.add_item().unwrap();
    harness.emit(ShoppingAction::Unknown);
    assert_eq!(harness.pump(), 2);

    let mut notifications = Vec::new();
    while let Some(items) = controller.poll_changed() {
        notifications.push(names(&items).join(","));
    }
    assert_eq!(notifications, ["Diet Coke,Milk", "Diet Coke,Milk,Eggs"]);
}

#[test]
fn test_replay_wire_format() {
    let lines = r#"
{"type":"[Shopping] Add Item","id":"abc","name":"Milk"}
{"type":"[Shopping] Add Item","id":"def","name":"Eggs"}
{"type":"[Shopping] Checkout"}
{"type":"[Shopping] Delete Item","id":"1775933f","name":"Diet Coke"}
{"type":"[Shopping] Delete Item","id":"1775933f"}
"#;
    let intents = parse_intents(lines.as_bytes()).unwrap();
    assert_eq!(intents.len(), 5);
    assert_eq!(intents[2], ShoppingAction::Unknown);

    let report = replay(seed_list(), intents);
    assert_eq!(names(&report.items), ["Milk", "Eggs"]);
    assert_eq!(report.applied, 5);
    assert_eq!(report.changed, 3);
    assert_eq!(report.unknown, 1);
}

#[tokio::test]
async fn test_store_task_pushes_updates() {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let store = Store::new(seed_list(), shopping_list_core::reducer);
    let mut controller =
        ShoppingController::new(&store, action_tx, SequentialIdGenerator::new("t-"));

    // The store lives on its own task, the only writer
    let writer = tokio::spawn(async move {
        let mut store = store;
        while let Some(action) = action_rx.recv().await {
            store.dispatch(action);
        }
        let items = store.state().clone();
        items
    });

    controller.set_draft_name("Milk");
    controller.add_item().unwrap();
    let items = controller.changed().await.unwrap();
    assert_eq!(names(&items), ["Diet Coke", "Milk"]);

    controller.delete_item(ItemRef::new("1775933f")).unwrap();
    let items = controller.changed().await.unwrap();
    assert_eq!(names(&items), ["Milk"]);

    // Closing the channel stops the writer
    drop(controller);
    let final_list = writer.await.unwrap();
    assert_eq!(final_list, vec![ShoppingItem::new("t-1", "Milk")]);
}
