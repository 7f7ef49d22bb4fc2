use crate::tree::tree_model::NodeId;

/// Confirmation/filter hook run before an action is submitted.
///
/// Receives the current selection; returns the (possibly filtered or
/// reordered) identifiers to proceed with, or `None` to abort the whole
/// submission ("user declined"). Runs synchronously; the result gates
/// the form submission, so there is no suspension point here.
pub type ActionCallback = Box<dyn Fn(&[NodeId]) -> Option<Vec<NodeId>>>;

/// Notification fired *before* the registry mutates, so collaborators can
/// log or react while the previous state is still visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    BeforeRegister { name: String },
    BeforeUnregister { name: String },
}

pub type RegistryObserver = Box<dyn Fn(&RegistryEvent)>;
