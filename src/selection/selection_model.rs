use crate::tree::tree_model::NodeId;

/// Ordered, de-duplicating set of checked node identifiers.
///
/// Travels inside form payloads as a single comma-joined field (`csvIDs`),
/// so the CSV round trip is part of the contract: `from_csv(&s.to_csv())`
/// reproduces `s`, including the empty selection (empty string both ways).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let mut selection = Selection::new();
        for id in ids {
            selection.insert(id.into());
        }
        selection
    }

    /// Append an identifier, keeping first-seen order. Duplicates are
    /// dropped silently.
    pub fn insert(&mut self, id: NodeId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &NodeId) {
        self.ids.retain(|existing| existing != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    /// Comma-joined wire form. Empty selection serializes to "".
    pub fn to_csv(&self) -> String {
        self.ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the comma-joined wire form. Empty or whitespace-only input
    /// yields the empty selection; blank segments are skipped.
    pub fn from_csv(csv: &str) -> Self {
        Selection::from_ids(
            csv.split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty()),
        )
    }
}
