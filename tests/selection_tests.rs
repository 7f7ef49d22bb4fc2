use batch_actions::selection::selection_model::Selection;
use batch_actions::selection::tracker::SelectionTracker;
use batch_actions::tree::tree_model::NodeId;
use batch_actions::tree::view::{MemoryTree, TreeView};

// =========================================================================
// CSV round trip
// =========================================================================

#[test]
fn csv_round_trip_preserves_selection() {
    let selection = Selection::from_ids(["10", "3", "7"]);
    let csv = selection.to_csv();

    assert_eq!(csv, "10,3,7", "Order is preserved on the wire");
    assert_eq!(
        Selection::from_csv(&csv),
        selection,
        "from_csv(to_csv(s)) == s"
    );
}

#[test]
fn empty_selection_round_trips_through_empty_string() {
    let empty = Selection::new();
    assert_eq!(empty.to_csv(), "", "Empty selection serializes to empty");
    assert_eq!(
        Selection::from_csv(""),
        empty,
        "Empty string deserializes to empty selection"
    );
    assert!(Selection::from_csv("").is_empty());
}

#[test]
fn from_csv_skips_blank_segments() {
    let selection = Selection::from_csv(" 1, ,2,,3 ");
    assert_eq!(
        selection,
        Selection::from_ids(["1", "2", "3"]),
        "Blank and whitespace-only segments are dropped"
    );
}

#[test]
fn insert_dedupes_preserving_first_seen_order() {
    let mut selection = Selection::new();
    selection.insert(NodeId::from("5"));
    selection.insert(NodeId::from("2"));
    selection.insert(NodeId::from("5"));

    assert_eq!(selection.to_csv(), "5,2", "Duplicate insert is a no-op");
    assert_eq!(selection.len(), 2);
}

// =========================================================================
// SelectionTracker capture
// =========================================================================

#[test]
fn capture_from_tree_reads_checked_nodes() {
    let mut tree = MemoryTree::from_ids(["1", "2", "3"]);
    tree.select(&NodeId::from("1"));
    tree.select(&NodeId::from("3"));

    let mut tracker = SelectionTracker::new();
    tracker.capture_from_tree(&tree);

    assert_eq!(tracker.csv_ids(), "1,3");
}

#[test]
fn capture_with_nothing_checked_is_valid_empty_state() {
    let tree = MemoryTree::from_ids(["1", "2"]);
    let mut tracker = SelectionTracker::new();

    tracker.capture_from_tree(&tree);

    assert!(tracker.pending().is_empty(), "Empty selection is valid");
    assert_eq!(tracker.csv_ids(), "");
}

#[test]
fn recapture_replaces_prior_pending_state() {
    let mut tree = MemoryTree::from_ids(["1", "2"]);
    tree.select(&NodeId::from("1"));

    let mut tracker = SelectionTracker::new();
    tracker.capture_from_tree(&tree);
    assert_eq!(tracker.csv_ids(), "1");

    tree.deselect(&NodeId::from("1"));
    tree.select(&NodeId::from("2"));
    tracker.capture_from_tree(&tree);

    assert_eq!(tracker.csv_ids(), "2", "Capture reflects the tree, not history");
}
