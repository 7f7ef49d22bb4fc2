use crate::tree::tree_model::{NodeId, TreeNode};

/// Contract the coordinator consumes from whatever renders the tree.
///
/// The real tree lives in a UI layer; the coordinator only ever talks to it
/// through these operations, so the whole flow can be exercised against
/// `MemoryTree` without a rendering harness.
pub trait TreeView {
    /// Identifiers of all currently checked nodes, in tree order.
    fn selected_ids(&self) -> Vec<NodeId>;

    /// Identifiers of every node under `root` (whole tree when `None`),
    /// in tree order. A non-`None` root yields strict descendants.
    fn visible_ids(&self, root: Option<&NodeId>) -> Vec<NodeId>;

    fn contains(&self, id: &NodeId) -> bool;
    fn title_of(&self, id: &NodeId) -> Option<String>;

    fn set_enabled(&mut self, id: &NodeId, enabled: bool);
    fn set_loading(&mut self, id: &NodeId, loading: bool);
    fn select(&mut self, id: &NodeId);
    fn deselect(&mut self, id: &NodeId);
    fn set_title(&mut self, id: &NodeId, title: &str);
    fn set_highlighted(&mut self, id: &NodeId, highlighted: bool);
    fn mark_failed(&mut self, id: &NodeId);

    /// Clear failure markers on every node (run before each submission).
    fn clear_failures(&mut self);

    /// Remove a node and all of its descendants.
    fn remove(&mut self, id: &NodeId);

    /// Full re-render after a submission: the server may have retitled or
    /// restructured nodes. Transient enablement/loading/check state resets;
    /// reconciliation markers (failed, highlighted) survive because they
    /// describe the submission outcome that was just merged.
    fn refresh(&mut self);
}

/// In-process tree: a parent-linked node store preserving insertion order.
///
/// Used directly by the CLI (which mirrors the ids it was given) and by
/// tests; a UI adapter would implement `TreeView` over its own widget.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: Vec<TreeNode>,
}

impl MemoryTree {
    pub fn new() -> Self {
        MemoryTree { nodes: Vec::new() }
    }

    /// Build a flat tree from identifiers, titled "Page <id>".
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let mut tree = MemoryTree::new();
        for id in ids {
            let id = id.into();
            let title = format!("Page {}", id);
            tree.insert(TreeNode::new(id, title));
        }
        tree
    }

    /// Insert or replace a node. Replacement keeps the original position.
    pub fn insert(&mut self, node: TreeNode) {
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(slot) => *slot = node,
            None => self.nodes.push(node),
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, id: &NodeId) -> Option<&mut TreeNode> {
        self.nodes.iter_mut().find(|n| n.id == *id)
    }

    fn descendants_of(&self, root: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        // Children appear after their parents in insertion order, so one
        // forward pass collects the whole subtree.
        for node in &self.nodes {
            if let Some(parent) = &node.parent {
                if parent == root || out.contains(parent) {
                    out.push(node.id.clone());
                }
            }
        }
        out
    }
}

impl TreeView for MemoryTree {
    fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.clone())
            .collect()
    }

    fn visible_ids(&self, root: Option<&NodeId>) -> Vec<NodeId> {
        match root {
            None => self.nodes.iter().map(|n| n.id.clone()).collect(),
            Some(root) => self.descendants_of(root),
        }
    }

    fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    fn title_of(&self, id: &NodeId) -> Option<String> {
        self.node(id).map(|n| n.title.clone())
    }

    fn set_enabled(&mut self, id: &NodeId, enabled: bool) {
        if let Some(node) = self.node_mut(id) {
            node.enabled = enabled;
        }
    }

    fn set_loading(&mut self, id: &NodeId, loading: bool) {
        if let Some(node) = self.node_mut(id) {
            node.loading = loading;
        }
    }

    fn select(&mut self, id: &NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.selected = true;
        }
    }

    fn deselect(&mut self, id: &NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.selected = false;
        }
    }

    fn set_title(&mut self, id: &NodeId, title: &str) {
        if let Some(node) = self.node_mut(id) {
            node.title = title.to_string();
        }
    }

    fn set_highlighted(&mut self, id: &NodeId, highlighted: bool) {
        if let Some(node) = self.node_mut(id) {
            node.highlighted = highlighted;
        }
    }

    fn mark_failed(&mut self, id: &NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.failed = true;
        }
    }

    fn clear_failures(&mut self) {
        for node in &mut self.nodes {
            node.failed = false;
        }
    }

    fn remove(&mut self, id: &NodeId) {
        let mut doomed = self.descendants_of(id);
        doomed.push(id.clone());
        self.nodes.retain(|n| !doomed.contains(&n.id));
    }

    fn refresh(&mut self) {
        for node in &mut self.nodes {
            node.enabled = true;
            node.loading = false;
            node.selected = false;
        }
    }
}
