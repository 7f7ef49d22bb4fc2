use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::tree::tree_model::NodeId;

/// Shown when the user submits with nothing checked.
pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one page";

/// Success body of a batch-action POST. Every field is optional on the
/// wire; absent maps sections mean "nothing to report".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionBody {
    #[serde(default)]
    pub modified: HashMap<NodeId, ModifiedNode>,
    #[serde(default)]
    pub deleted: HashMap<NodeId, Value>,
    #[serde(default)]
    pub error: HashMap<NodeId, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModifiedNode {
    #[serde(rename = "TreeTitle")]
    pub tree_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// Server status line for the UI, styled by transport outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Terminal result of one submission attempt.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Nothing was checked; no network call was made.
    NoSelection,
    /// No action was chosen; no network call was made.
    NoAction,
    /// The action callback declined (or filtered to nothing). Silent
    /// abort: no network call, no message, tree untouched.
    Declined,
    /// Action name had no registered callback and the permissive
    /// fallback is disabled.
    UnknownAction { name: String },
    /// The POST never completed. The tree was still refreshed so local
    /// state resynchronizes with server truth.
    TransportFailed {
        status: Option<StatusMessage>,
        error: String,
    },
    /// The POST completed (per-item errors are non-fatal).
    Completed {
        status: Option<StatusMessage>,
        modified: Vec<NodeId>,
        deleted: Vec<NodeId>,
        failed: Vec<NodeId>,
    },
}

impl SubmissionOutcome {
    /// True when the submission reached the server and came back clean.
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Completed { failed, .. } if failed.is_empty())
    }
}
