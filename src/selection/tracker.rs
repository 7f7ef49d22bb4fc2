use crate::selection::selection_model::Selection;
use crate::tree::view::TreeView;

/// Holds the pending selection: the identifiers that will ride in the
/// `csvIDs` form field of the next submission.
///
/// Re-captured from the tree on every check/uncheck and after every tree
/// reload, so it is always a subset of the current tree snapshot.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    pending: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        SelectionTracker::default()
    }

    /// Read the tree's checked identifiers into pending state. Infallible:
    /// an empty selection is a valid, empty state.
    pub fn capture_from_tree(&mut self, tree: &dyn TreeView) {
        self.pending = Selection::from_ids(tree.selected_ids());
    }

    pub fn pending(&self) -> &Selection {
        &self.pending
    }

    /// Replace pending state wholesale (e.g. after a callback narrowed it).
    pub fn set_pending(&mut self, selection: Selection) {
        self.pending = selection;
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// The wire form that goes into the submission payload.
    pub fn csv_ids(&self) -> String {
        self.pending.to_csv()
    }
}
