use url::Url;

use crate::{
    client::{error::ClientError, http::BatchTransport},
    eligibility::{
        eligibility_model::{ApplyOutcome, RefreshOutcome},
        negotiator::EligibilityNegotiator,
    },
    registry::registry::ActionRegistry,
    selection::tracker::SelectionTracker,
    submit::{
        coordinator::{BatchCoordinator, CoordinatorConfig},
        submit_model::SubmissionOutcome,
    },
    trace::logger::TraceLogger,
    tree::{
        tree_model::NodeId,
        view::{MemoryTree, TreeView},
    },
};

pub mod cli;
pub mod client;
pub mod eligibility;
pub mod registry;
pub mod selection;
pub mod submit;
pub mod trace;
pub mod tree;

/// Ask the server which of `ids` the given action applies to.
///
/// Returns `(eligible, ineligible)` in input order. The root sentinel id
/// is always eligible without asking.
pub fn run_check(
    action_url: &Url,
    ids: &[NodeId],
    transport: &dyn BatchTransport,
) -> Result<(Vec<NodeId>, Vec<NodeId>), ClientError> {
    let mut tree = mirror_tree(ids);
    let mut negotiator = EligibilityNegotiator::new();

    let ticket = match negotiator.begin_refresh(&mut tree, Some(action_url), true, None)? {
        RefreshOutcome::Pending(ticket) => ticket,
        // Cannot happen with an action URL and batch mode on, but the
        // answer is still correct: nothing was filtered.
        RefreshOutcome::AllEnabled => return Ok((ids.to_vec(), vec![])),
    };

    let applicable = negotiator.fetch(&ticket, transport)?;

    let (eligible, ineligible) = ids
        .iter()
        .cloned()
        .partition(|id| id.is_root_sentinel() || applicable.contains(id));
    Ok((eligible, ineligible))
}

/// Run one batch action end to end against a live endpoint: mirror the
/// given ids into an in-process tree, narrow the selection through the
/// eligibility endpoint, then drive the submission coordinator.
pub fn run_apply(
    action_url: &Url,
    ids: &[NodeId],
    extra_fields: &[(String, String)],
    registry: &ActionRegistry,
    transport: &dyn BatchTransport,
    config: CoordinatorConfig,
    tracer: &TraceLogger,
) -> Result<SubmissionOutcome, ClientError> {
    let mut tree = mirror_tree(ids);
    let mut tracker = SelectionTracker::new();
    tracker.capture_from_tree(&tree);

    let mut negotiator = EligibilityNegotiator::new();
    let refreshed = negotiator.refresh(
        &mut tree,
        &mut tracker,
        Some(action_url),
        true,
        None,
        transport,
    )?;
    if let ApplyOutcome::Failed(msg) = refreshed {
        // Eligibility is advisory here; the server re-checks on submit.
        eprintln!(
            "Warning: eligibility check failed, submitting the full selection: {}",
            msg
        );
    }

    let mut coordinator = BatchCoordinator::new(config);
    coordinator.set_action(Some(action_url.clone()));
    Ok(coordinator.submit(registry, &mut tree, &mut tracker, transport, extra_fields, tracer))
}

/// Flat in-process stand-in for the CMS tree, with every id checked.
fn mirror_tree(ids: &[NodeId]) -> MemoryTree {
    let mut tree = MemoryTree::from_ids(ids.iter().cloned());
    for id in ids {
        tree.select(id);
    }
    tree
}
