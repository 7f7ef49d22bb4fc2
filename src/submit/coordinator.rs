use url::Url;

use crate::client::http::BatchTransport;
use crate::registry::registry::ActionRegistry;
use crate::selection::selection_model::Selection;
use crate::selection::tracker::SelectionTracker;
use crate::submit::submit_model::{
    StatusLevel, StatusMessage, SubmissionBody, SubmissionOutcome,
};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;
use crate::tree::tree_model::NodeId;
use crate::tree::view::TreeView;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// When the action name extracted from the URL has no registered
    /// callback, `true` submits anyway with the unmodified selection (the
    /// historical behavior, an escape hatch for custom action URLs);
    /// `false` aborts with `SubmissionOutcome::UnknownAction`.
    pub allow_unregistered_actions: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            allow_unregistered_actions: true,
        }
    }
}

/// Phases of one submission attempt. The coordinator is back at `Idle`
/// by the time `submit` returns; the field exists so an adapter can poll
/// a busy indicator while a submission thread runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    AwaitingConfirmation,
    Submitting,
    Reconciling,
}

/// Drives one batch submission end to end: validate the pending
/// selection, run the registered confirmation/filter callback, POST to
/// the action endpoint (exactly once, no retries), and reconcile the
/// server's answer back into the tree.
pub struct BatchCoordinator {
    config: CoordinatorConfig,
    phase: Phase,
    chosen_action: Option<Url>,
}

impl BatchCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        BatchCoordinator {
            config,
            phase: Phase::Idle,
            chosen_action: None,
        }
    }

    /// The action URL picked in the action control. Reset to `None` by
    /// reconciliation after every submission attempt that reaches it.
    pub fn set_action(&mut self, url: Option<Url>) {
        self.chosen_action = url;
    }

    pub fn action(&self) -> Option<&Url> {
        self.chosen_action.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Submitting | Phase::Reconciling)
    }

    /// Run one submission attempt. Always returns with the coordinator
    /// idle again; the outcome says how far the attempt got.
    pub fn submit(
        &mut self,
        registry: &ActionRegistry,
        tree: &mut dyn TreeView,
        tracker: &mut SelectionTracker,
        transport: &dyn BatchTransport,
        extra_fields: &[(String, String)],
        tracer: &TraceLogger,
    ) -> SubmissionOutcome {
        // ---- Validating ----
        self.phase = Phase::Validating;

        let mut ids: Vec<NodeId> = tracker.pending().as_slice().to_vec();
        if ids.is_empty() {
            tracer.log(&TraceEvent::now("submit_aborted").with_detail("no selection"));
            self.phase = Phase::Idle;
            return SubmissionOutcome::NoSelection;
        }

        let action_url = match self.chosen_action.clone() {
            Some(url) => url,
            None => {
                tracer.log(&TraceEvent::now("submit_aborted").with_detail("no action"));
                self.phase = Phase::Idle;
                return SubmissionOutcome::NoAction;
            }
        };

        // ---- AwaitingConfirmation ----
        self.phase = Phase::AwaitingConfirmation;

        let name = action_name(&action_url).unwrap_or_default();
        match registry.apply(&name, &ids) {
            Some(Some(filtered)) if !filtered.is_empty() => ids = filtered,
            Some(_) => {
                // Falsy/empty return means the user declined. Silent abort.
                tracer.log(
                    &TraceEvent::now("submit_declined").with_action(&name),
                );
                self.phase = Phase::Idle;
                return SubmissionOutcome::Declined;
            }
            None if self.config.allow_unregistered_actions => {
                // No confirmation gate for unmatched names; proceed with
                // the unmodified selection.
            }
            None => {
                tracer.log(
                    &TraceEvent::now("submit_aborted")
                        .with_action(&name)
                        .with_detail("unregistered action"),
                );
                self.phase = Phase::Idle;
                return SubmissionOutcome::UnknownAction { name };
            }
        }

        // ---- Submitting ----
        self.phase = Phase::Submitting;

        tracker.set_pending(Selection::from_ids(ids.clone()));
        tree.clear_failures();

        let mut form: Vec<(String, String)> =
            vec![("csvIDs".to_string(), tracker.csv_ids())];
        form.extend(extra_fields.iter().cloned());

        tracer.log(
            &TraceEvent::now("submit")
                .with_action(&name)
                .with_ids(&ids),
        );

        let result = transport.post_action(&action_url, &form);

        // ---- Reconciling (always, success or failure) ----
        self.phase = Phase::Reconciling;

        // Full refresh: node titles and structure may have changed
        // server-side, and a failed POST may still have partially applied.
        tree.refresh();
        tracker.clear();
        self.chosen_action = None;

        let outcome = match result {
            Err(e) => {
                tracer.log(
                    &TraceEvent::now("submit_failed")
                        .with_action(&name)
                        .with_detail(&e),
                );
                SubmissionOutcome::TransportFailed {
                    status: None,
                    error: e.to_string(),
                }
            }
            Ok(response) => {
                let level = if response.ok {
                    StatusLevel::Success
                } else {
                    StatusLevel::Error
                };
                let status = response
                    .status_message
                    .map(|text| StatusMessage { text, level });

                if response.ok {
                    let (modified, deleted, failed) =
                        reconcile_body(tree, response.body.unwrap_or_default());
                    tracer.log(
                        &TraceEvent::now("submit_complete")
                            .with_action(&name)
                            .with_ids(&modified),
                    );
                    SubmissionOutcome::Completed {
                        status,
                        modified,
                        deleted,
                        failed,
                    }
                } else {
                    tracer.log(
                        &TraceEvent::now("submit_failed")
                            .with_action(&name)
                            .with_detail("server returned an error status"),
                    );
                    SubmissionOutcome::TransportFailed {
                        status,
                        error: "server returned an error status".to_string(),
                    }
                }
            }
        };

        self.phase = Phase::Idle;
        outcome
    }
}

/// Merge a success body into the tree: retitle and highlight modified
/// nodes, drop deleted nodes still present, mark errored nodes failed.
/// Returns the touched ids sorted for stable reporting.
fn reconcile_body(
    tree: &mut dyn TreeView,
    body: SubmissionBody,
) -> (Vec<NodeId>, Vec<NodeId>, Vec<NodeId>) {
    let mut modified = Vec::new();
    for (id, node) in body.modified {
        tree.set_title(&id, &node.tree_title);
        tree.set_highlighted(&id, true);
        modified.push(id);
    }

    let mut deleted = Vec::new();
    for id in body.deleted.into_keys() {
        if tree.contains(&id) {
            tree.remove(&id);
        }
        deleted.push(id);
    }

    let mut failed = Vec::new();
    for id in body.error.into_keys() {
        tree.mark_failed(&id);
        failed.push(id);
    }

    modified.sort();
    deleted.sort();
    failed.sort();
    (modified, deleted, failed)
}

/// Action name = last non-empty path segment of the action URL.
pub fn action_name(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}
