use std::collections::HashMap;
use std::rc::Rc;

use crate::registry::prompt::Prompter;
use crate::registry::registry_model::{ActionCallback, RegistryEvent, RegistryObserver};
use crate::tree::tree_model::NodeId;

/// Maps action names to their confirmation/filter callbacks.
///
/// Explicitly constructed and passed by reference, never a process
/// global. At most one callback per name; registering a duplicate name
/// overwrites, and both register and unregister notify observers before
/// the mutation becomes visible.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionCallback>,
    observers: Vec<RegistryObserver>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        ActionRegistry::default()
    }

    /// Registry pre-loaded with the stock page actions. Each callback asks
    /// the prompter to confirm a message interpolating the selected count
    /// and declines the submission when the answer is no.
    pub fn with_defaults(prompter: Rc<dyn Prompter>) -> Self {
        let mut registry = ActionRegistry::new();

        let p = Rc::clone(&prompter);
        registry.register(
            "publish",
            Box::new(move |ids| {
                let msg = format!(
                    "You have {} page(s) selected.\n\nDo you really want to publish?",
                    ids.len()
                );
                if p.confirm(&msg) { Some(ids.to_vec()) } else { None }
            }),
        );

        let p = Rc::clone(&prompter);
        registry.register(
            "unpublish",
            Box::new(move |ids| {
                let msg = format!(
                    "You have {} page(s) selected.\n\nDo you really want to unpublish?",
                    ids.len()
                );
                if p.confirm(&msg) { Some(ids.to_vec()) } else { None }
            }),
        );

        let p = Rc::clone(&prompter);
        registry.register(
            "delete",
            Box::new(move |ids| {
                let msg = format!(
                    "You have {} page(s) selected.\n\n\
                     Are you sure you want to delete these pages?\n\n\
                     These pages and all of their children pages will be \
                     deleted and sent to the archive.",
                    ids.len()
                );
                if p.confirm(&msg) { Some(ids.to_vec()) } else { None }
            }),
        );

        let p = Rc::clone(&prompter);
        registry.register(
            "restore",
            Box::new(move |ids| {
                let msg = format!(
                    "You have {} page(s) selected.\n\n\
                     Do you really want to restore to stage?\n\n\
                     Children of archived pages will be restored to the root \
                     level, unless those pages are also being restored.",
                    ids.len()
                );
                if p.confirm(&msg) { Some(ids.to_vec()) } else { None }
            }),
        );

        registry
    }

    /// Watch register/unregister events. Observers fire before the
    /// corresponding mutation is applied.
    pub fn observe(&mut self, observer: RegistryObserver) {
        self.observers.push(observer);
    }

    /// Add or overwrite the callback for `name`. Overwriting an existing
    /// name is not an error.
    pub fn register(&mut self, name: impl Into<String>, callback: ActionCallback) {
        let name = name.into();
        self.notify(&RegistryEvent::BeforeRegister { name: name.clone() });
        self.actions.insert(name, callback);
    }

    /// Remove the callback for `name`. No-op if absent, but the
    /// notification still fires first (observers see every attempt).
    pub fn unregister(&mut self, name: &str) {
        self.notify(&RegistryEvent::BeforeUnregister {
            name: name.to_string(),
        });
        self.actions.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&ActionCallback> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Invoke the callback for `name` with the current selection.
    /// Returns `None` when no callback is registered under that name.
    pub fn apply(&self, name: &str, ids: &[NodeId]) -> Option<Option<Vec<NodeId>>> {
        self.actions.get(name).map(|cb| cb(ids))
    }

    fn notify(&self, event: &RegistryEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}
