use std::error::Error;
use std::rc::Rc;
use std::time::Duration;

use url::Url;

use crate::client::http::HttpTransport;
use crate::registry::prompt::{AutoPrompter, ConsolePrompter, Prompter};
use crate::registry::registry::ActionRegistry;
use crate::selection::selection_model::Selection;
use crate::submit::coordinator::CoordinatorConfig;
use crate::submit::submit_model::{StatusLevel, SubmissionOutcome};
use crate::trace::logger::TraceLogger;
use crate::{run_apply, run_check};

// ============================================================================
// actions subcommand
// ============================================================================

pub fn cmd_actions() {
    let registry = ActionRegistry::with_defaults(Rc::new(AutoPrompter { answer: true }));
    for name in registry.names() {
        println!("{}", name);
    }
}

// ============================================================================
// check subcommand
// ============================================================================

pub fn cmd_check(
    action: &str,
    ids: &str,
    timeout_secs: u64,
    verbose: u8,
) -> Result<(), Box<dyn Error>> {
    let action_url = Url::parse(action)?;
    let selection = Selection::from_csv(ids);
    let transport = HttpTransport::new(Duration::from_secs(timeout_secs))?;

    if verbose > 0 {
        eprintln!(
            "Checking {} page(s) against {}...",
            selection.len(),
            action_url
        );
    }

    let (eligible, ineligible) = run_check(&action_url, selection.as_slice(), &transport)?;

    println!(
        "Eligible ({}): {}",
        eligible.len(),
        Selection::from_ids(eligible).to_csv()
    );
    println!(
        "Ineligible ({}): {}",
        ineligible.len(),
        Selection::from_ids(ineligible).to_csv()
    );

    Ok(())
}

// ============================================================================
// apply subcommand
// ============================================================================

pub fn cmd_apply(
    action: &str,
    ids: &str,
    yes: bool,
    params: &[String],
    allow_unregistered_actions: bool,
    timeout_secs: u64,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn Error>> {
    let action_url = Url::parse(action)?;
    let selection = Selection::from_csv(ids);
    let extra_fields = parse_params(params)?;
    let transport = HttpTransport::new(Duration::from_secs(timeout_secs))?;

    let prompter: Rc<dyn Prompter> = if yes {
        Rc::new(AutoPrompter { answer: true })
    } else {
        Rc::new(ConsolePrompter)
    };
    let registry = ActionRegistry::with_defaults(prompter);

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    if verbose > 0 {
        eprintln!(
            "Applying {} to {} page(s)...",
            action_url,
            selection.len()
        );
    }

    let outcome = run_apply(
        &action_url,
        selection.as_slice(),
        &extra_fields,
        &registry,
        &transport,
        CoordinatorConfig {
            allow_unregistered_actions,
        },
        &tracer,
    )?;

    print_outcome(&outcome);
    Ok(outcome.is_success())
}

fn print_outcome(outcome: &SubmissionOutcome) {
    match outcome {
        SubmissionOutcome::NoSelection => {
            println!("{}", crate::submit::submit_model::SELECT_AT_LEAST_ONE);
        }
        SubmissionOutcome::NoAction => {
            println!("No action chosen");
        }
        SubmissionOutcome::Declined => {
            println!("Cancelled");
        }
        SubmissionOutcome::UnknownAction { name } => {
            println!("No registered action named '{}'", name);
        }
        SubmissionOutcome::TransportFailed { status, error } => {
            match status {
                Some(msg) => println!("Failed: {}", msg.text),
                None => println!("Failed: {}", error),
            }
        }
        SubmissionOutcome::Completed {
            status,
            modified,
            deleted,
            failed,
        } => {
            if let Some(msg) = status {
                let marker = match msg.level {
                    StatusLevel::Success => "\u{2713}",
                    StatusLevel::Error => "\u{2717}",
                };
                println!("{} {}", marker, msg.text);
            }
            println!(
                "{} modified, {} deleted, {} failed",
                modified.len(),
                deleted.len(),
                failed.len()
            );
            for id in failed {
                println!("  [FAIL] page {}", id);
            }
        }
    }
}

/// Parse repeatable `--param key=value` pairs.
fn parse_params(params: &[String]) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let mut fields = Vec::new();
    for param in params {
        match param.split_once('=') {
            Some((key, value)) => fields.push((key.to_string(), value.to_string())),
            None => return Err(format!("Malformed --param '{}' (expected key=value)", param).into()),
        }
    }
    Ok(fields)
}
