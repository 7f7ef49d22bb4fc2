use std::rc::Rc;

use batch_actions::registry::prompt::AutoPrompter;
use batch_actions::registry::registry::ActionRegistry;
use batch_actions::submit::coordinator::CoordinatorConfig;
use batch_actions::submit::submit_model::SubmissionOutcome;
use batch_actions::trace::logger::TraceLogger;
use batch_actions::{run_apply, run_check};
use url::Url;

use crate::common::transport::{ScriptedTransport, ids, ok_response, transport_error};

mod common;

fn publish_url() -> Url {
    Url::parse("https://cms.example/admin/pages/batch/publish").unwrap()
}

// =========================================================================
// run_check
// =========================================================================

#[test]
fn check_partitions_ids_by_server_answer() {
    let transport = ScriptedTransport::new();
    transport.queue_applicable(Ok(ids(&["2", "5"])));

    let (eligible, ineligible) =
        run_check(&publish_url(), &ids(&["0", "2", "3", "5", "7"]), &transport).unwrap();

    assert_eq!(eligible, ids(&["0", "2", "5"]), "Sentinel always eligible");
    assert_eq!(ineligible, ids(&["3", "7"]));
    assert_eq!(transport.get_count(), 1);

    let url = transport.get_urls.borrow()[0].clone();
    assert!(
        url.path().ends_with("/publish/applicablepages/"),
        "Eligibility endpoint derived from the action URL: {}",
        url
    );
}

#[test]
fn check_propagates_fetch_errors() {
    let transport = ScriptedTransport::new();
    transport.queue_applicable(Err(transport_error()));

    let result = run_check(&publish_url(), &ids(&["1"]), &transport);
    assert!(result.is_err());
}

// =========================================================================
// run_apply: eligibility narrows, then submits
// =========================================================================

#[test]
fn apply_narrows_selection_through_eligibility_before_posting() {
    let transport = ScriptedTransport::new();
    transport.queue_applicable(Ok(ids(&["10"])));
    transport.queue_response(Ok(ok_response(
        Some("Published 1 page"),
        r#"{"modified":{"10":{"TreeTitle":"Home"}}}"#,
    )));

    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: true }));
    let outcome = run_apply(
        &publish_url(),
        &ids(&["10", "11"]),
        &[],
        &registry,
        &transport,
        CoordinatorConfig::default(),
        &TraceLogger::disabled(),
    )
    .unwrap();

    match outcome {
        SubmissionOutcome::Completed { modified, .. } => {
            assert_eq!(modified, ids(&["10"]))
        }
        other => panic!("expected Completed, got {:?}", other),
    }

    let posts = transport.post_calls.borrow();
    assert_eq!(posts.len(), 1);
    assert!(
        posts[0].1.contains(&("csvIDs".to_string(), "10".to_string())),
        "Ineligible id 11 filtered out before the POST: {:?}",
        posts[0].1
    );
}

#[test]
fn apply_declined_by_prompter_posts_nothing() {
    let transport = ScriptedTransport::new();
    transport.queue_applicable(Ok(ids(&["10", "11"])));

    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: false }));
    let outcome = run_apply(
        &publish_url(),
        &ids(&["10", "11"]),
        &[],
        &registry,
        &transport,
        CoordinatorConfig::default(),
        &TraceLogger::disabled(),
    )
    .unwrap();

    assert!(matches!(outcome, SubmissionOutcome::Declined));
    assert_eq!(transport.post_count(), 0);
}

#[test]
fn apply_with_everything_ineligible_aborts_with_no_selection() {
    let transport = ScriptedTransport::new();
    transport.queue_applicable(Ok(vec![]));

    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: true }));
    let outcome = run_apply(
        &publish_url(),
        &ids(&["10", "11"]),
        &[],
        &registry,
        &transport,
        CoordinatorConfig::default(),
        &TraceLogger::disabled(),
    )
    .unwrap();

    assert!(
        matches!(outcome, SubmissionOutcome::NoSelection),
        "Eligibility deselected everything, so there is nothing to submit"
    );
    assert_eq!(transport.post_count(), 0);
}
