use url::Url;

use crate::tree::tree_model::NodeId;

/// One outstanding eligibility request. The sequence number ties the
/// eventual response back to the refresh that issued it; only the latest
/// issued ticket may mutate tree state ("last request wins").
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub seq: u64,
    pub url: Url,
    pub candidates: Vec<NodeId>,
}

/// What `begin_refresh` decided to do.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// No action chosen or batch mode inactive: every node was enabled
    /// and no request is needed.
    AllEnabled,
    /// Nodes are disabled/loading; fetch the ticket's URL and feed the
    /// result to `apply`.
    Pending(RefreshTicket),
}

/// What applying a response did to the tree.
#[derive(Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { enabled: usize, deselected: usize },
    /// A newer refresh superseded this ticket; nothing was touched.
    Stale,
    /// The fetch failed; enablement was restored and the message should
    /// be surfaced transiently.
    Failed(String),
}
