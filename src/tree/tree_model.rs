use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Opaque identifier naming one tree node. Stable across tree reloads.
///
/// Servers emit identifiers as JSON numbers or strings interchangeably,
/// so deserialization accepts both and normalizes to the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Reserved root-level sentinel: always eligible for any action.
    pub const ROOT_SENTINEL: &'static str = "0";

    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root_sentinel(&self) -> bool {
        self.0 == Self::ROOT_SENTINEL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id.to_string())
    }
}

struct NodeIdVisitor;

impl de::Visitor<'_> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer node identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

/// One node in the tree, with the UI-facing flags the coordinator mutates.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub title: String,

    /// Whether the node may be targeted by the currently chosen action.
    pub enabled: bool,
    /// Set while an eligibility request for this node is in flight.
    pub loading: bool,
    /// Checked by the user (or programmatically).
    pub selected: bool,
    /// The last submission reported a per-item error for this node.
    pub failed: bool,
    /// The last submission modified this node (visual emphasis).
    pub highlighted: bool,
}

impl TreeNode {
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        TreeNode {
            id: id.into(),
            parent: None,
            title: title.into(),
            enabled: true,
            loading: false,
            selected: false,
            failed: false,
            highlighted: false,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl From<&str> for TreeNode {
    fn from(id: &str) -> Self {
        TreeNode::new(id, format!("Page {}", id))
    }
}
