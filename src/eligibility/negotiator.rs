use url::Url;

use crate::client::error::ClientError;
use crate::client::http::BatchTransport;
use crate::eligibility::eligibility_model::{ApplyOutcome, RefreshOutcome, RefreshTicket};
use crate::selection::tracker::SelectionTracker;
use crate::tree::tree_model::NodeId;
use crate::tree::view::TreeView;

/// Path segment appended to an action URL to reach its eligibility
/// endpoint.
const APPLICABLE_PAGES_SEGMENT: &str = "applicablepages";

/// Asks the server which visible nodes are valid targets for the chosen
/// action, then reflects the answer into the tree (enable/disable,
/// forced deselect).
///
/// The refresh is split into explicit phases (`begin_refresh`, a fetch,
/// `apply`) so the caller controls the suspension point and stale
/// responses can be detected: each refresh bumps a monotonic sequence
/// number, and `apply` discards any ticket that is no longer the latest.
#[derive(Debug, Default)]
pub struct EligibilityNegotiator {
    latest_seq: u64,
}

impl EligibilityNegotiator {
    pub fn new() -> Self {
        EligibilityNegotiator::default()
    }

    /// Start a refresh for the nodes under `root` (whole tree if `None`).
    ///
    /// Without a chosen action, or with batch mode inactive, every node
    /// is enabled and no request is issued. Otherwise all candidates are
    /// disabled and marked loading until `apply` runs.
    pub fn begin_refresh(
        &mut self,
        tree: &mut dyn TreeView,
        action_url: Option<&Url>,
        batch_mode: bool,
        root: Option<&NodeId>,
    ) -> Result<RefreshOutcome, ClientError> {
        let candidates = tree.visible_ids(root);

        let action_url = match action_url {
            Some(url) if batch_mode => url,
            _ => {
                for id in &candidates {
                    tree.set_enabled(id, true);
                }
                return Ok(RefreshOutcome::AllEnabled);
            }
        };

        for id in &candidates {
            tree.set_loading(id, true);
            tree.set_enabled(id, false);
        }

        self.latest_seq += 1;
        let url = applicable_pages_url(action_url, &candidates)?;

        Ok(RefreshOutcome::Pending(RefreshTicket {
            seq: self.latest_seq,
            url,
            candidates,
        }))
    }

    /// Fetch the eligible set for a ticket.
    pub fn fetch(
        &self,
        ticket: &RefreshTicket,
        transport: &dyn BatchTransport,
    ) -> Result<Vec<NodeId>, ClientError> {
        transport.get_applicable(&ticket.url)
    }

    /// Reconcile a fetched response into the tree.
    ///
    /// Stale tickets (superseded by a newer `begin_refresh`) mutate
    /// nothing. On success, a candidate is enabled iff it is the root
    /// sentinel or in the eligible set; everything else is disabled and
    /// forcibly deselected: ineligibility overrides prior selection.
    /// The tracker is re-captured afterwards so pending state reflects
    /// the filter. On fetch failure, enablement is restored.
    pub fn apply(
        &self,
        ticket: &RefreshTicket,
        result: Result<Vec<NodeId>, ClientError>,
        tree: &mut dyn TreeView,
        tracker: &mut SelectionTracker,
    ) -> ApplyOutcome {
        if ticket.seq != self.latest_seq {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(eligible) => {
                let mut enabled = 0;
                let mut deselected = 0;

                for id in &ticket.candidates {
                    tree.set_loading(id, false);
                    if id.is_root_sentinel() || eligible.contains(id) {
                        tree.set_enabled(id, true);
                        enabled += 1;
                    } else {
                        tree.set_enabled(id, false);
                        if tree.selected_ids().contains(id) {
                            deselected += 1;
                        }
                        tree.deselect(id);
                    }
                }

                tracker.capture_from_tree(tree);
                ApplyOutcome::Applied {
                    enabled,
                    deselected,
                }
            }
            Err(e) => {
                for id in &ticket.candidates {
                    tree.set_loading(id, false);
                    tree.set_enabled(id, true);
                }
                ApplyOutcome::Failed(e.to_string())
            }
        }
    }

    /// One-shot refresh for live use: begin, fetch, apply.
    pub fn refresh(
        &mut self,
        tree: &mut dyn TreeView,
        tracker: &mut SelectionTracker,
        action_url: Option<&Url>,
        batch_mode: bool,
        root: Option<&NodeId>,
        transport: &dyn BatchTransport,
    ) -> Result<ApplyOutcome, ClientError> {
        match self.begin_refresh(tree, action_url, batch_mode, root)? {
            RefreshOutcome::AllEnabled => Ok(ApplyOutcome::Applied {
                enabled: tree.visible_ids(root).len(),
                deselected: 0,
            }),
            RefreshOutcome::Pending(ticket) => {
                let result = self.fetch(&ticket, transport);
                Ok(self.apply(&ticket, result, tree, tracker))
            }
        }
    }
}

/// Derive the eligibility endpoint from an action URL: push
/// `applicablepages/` onto the path, keep the original query parameters,
/// and append the comma-joined candidate list.
pub fn applicable_pages_url(
    action_url: &Url,
    candidates: &[NodeId],
) -> Result<Url, ClientError> {
    let mut url = action_url.clone();

    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidActionUrl(action_url.to_string()))?
        .pop_if_empty()
        .push(APPLICABLE_PAGES_SEGMENT)
        // Trailing slash, matching the server route.
        .push("");

    let csv = candidates
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    url.query_pairs_mut().append_pair("csvIDs", &csv);

    Ok(url)
}
