use std::cell::RefCell;
use std::rc::Rc;

use batch_actions::registry::prompt::AutoPrompter;
use batch_actions::registry::registry::ActionRegistry;
use batch_actions::registry::registry_model::RegistryEvent;
use batch_actions::tree::tree_model::NodeId;

fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

// =========================================================================
// Register / overwrite semantics
// =========================================================================

#[test]
fn registering_duplicate_name_overwrites_callback() {
    let mut registry = ActionRegistry::new();
    registry.register("publish", Box::new(|_| Some(vec![NodeId::from("first")])));
    registry.register("publish", Box::new(|_| Some(vec![NodeId::from("second")])));

    let result = registry
        .apply("publish", &ids(&["1"]))
        .expect("publish must be registered");
    assert_eq!(
        result,
        Some(vec![NodeId::from("second")]),
        "Second registration wins"
    );
}

#[test]
fn register_notifies_exactly_once_per_call() {
    let events: Rc<RefCell<Vec<RegistryEvent>>> = Rc::new(RefCell::new(vec![]));

    let mut registry = ActionRegistry::new();
    let sink = Rc::clone(&events);
    registry.observe(Box::new(move |event| sink.borrow_mut().push(event.clone())));

    registry.register("publish", Box::new(|ids| Some(ids.to_vec())));
    registry.register("publish", Box::new(|ids| Some(ids.to_vec())));

    let events = events.borrow();
    assert_eq!(events.len(), 2, "One notification per register call");
    assert!(events.iter().all(|e| matches!(
        e,
        RegistryEvent::BeforeRegister { name } if name == "publish"
    )));
}

// =========================================================================
// Unregister
// =========================================================================

#[test]
fn unregister_removes_action() {
    let mut registry = ActionRegistry::new();
    registry.register("delete", Box::new(|ids| Some(ids.to_vec())));
    registry.unregister("delete");

    assert!(!registry.contains("delete"));
    assert!(registry.apply("delete", &ids(&["1"])).is_none());
}

#[test]
fn unregister_absent_name_is_noop_but_still_notifies() {
    let events: Rc<RefCell<Vec<RegistryEvent>>> = Rc::new(RefCell::new(vec![]));

    let mut registry = ActionRegistry::new();
    registry.register("publish", Box::new(|ids| Some(ids.to_vec())));

    let sink = Rc::clone(&events);
    registry.observe(Box::new(move |event| sink.borrow_mut().push(event.clone())));

    registry.unregister("no-such-action");

    assert!(registry.contains("publish"), "Unrelated entries untouched");
    assert_eq!(
        *events.borrow(),
        vec![RegistryEvent::BeforeUnregister {
            name: "no-such-action".to_string()
        }],
        "Notification fires even when the name is absent"
    );
}

// =========================================================================
// Default actions
// =========================================================================

#[test]
fn defaults_register_the_four_stock_actions() {
    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: true }));
    assert_eq!(
        registry.names(),
        vec!["delete", "publish", "restore", "unpublish"]
    );
}

#[test]
fn default_callbacks_pass_ids_through_when_confirmed() {
    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: true }));
    let selected = ids(&["4", "8"]);

    for name in ["publish", "unpublish", "delete", "restore"] {
        let result = registry.apply(name, &selected).expect("default registered");
        assert_eq!(
            result,
            Some(selected.clone()),
            "Confirmed {} returns the unmodified id list",
            name
        );
    }
}

#[test]
fn default_callbacks_decline_when_not_confirmed() {
    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: false }));
    let selected = ids(&["4", "8"]);

    for name in ["publish", "unpublish", "delete", "restore"] {
        let result = registry.apply(name, &selected).expect("default registered");
        assert_eq!(result, None, "Declined {} aborts the submission", name);
    }
}

// =========================================================================
// Callback filtering
// =========================================================================

#[test]
fn callbacks_may_filter_the_selection() {
    let mut registry = ActionRegistry::new();
    registry.register(
        "publish",
        Box::new(|ids| {
            Some(
                ids.iter()
                    .filter(|id| id.as_str() != "13")
                    .cloned()
                    .collect(),
            )
        }),
    );

    let result = registry
        .apply("publish", &ids(&["12", "13", "14"]))
        .expect("registered");
    assert_eq!(result, Some(ids(&["12", "14"])));
}
