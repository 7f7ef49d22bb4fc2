use std::cell::RefCell;
use std::collections::VecDeque;

use url::Url;

use batch_actions::client::error::ClientError;
use batch_actions::client::http::{ActionResponse, BatchTransport};
use batch_actions::submit::submit_model::SubmissionBody;
use batch_actions::tree::tree_model::NodeId;

/// Test transport: replays queued responses and records every call, so
/// tests can assert on call counts, URLs, and form payloads.
#[derive(Default)]
pub struct ScriptedTransport {
    applicable: RefCell<VecDeque<Result<Vec<NodeId>, ClientError>>>,
    responses: RefCell<VecDeque<Result<ActionResponse, ClientError>>>,
    pub get_urls: RefCell<Vec<Url>>,
    pub post_calls: RefCell<Vec<(Url, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        ScriptedTransport::default()
    }

    pub fn queue_applicable(&self, result: Result<Vec<NodeId>, ClientError>) {
        self.applicable.borrow_mut().push_back(result);
    }

    pub fn queue_response(&self, result: Result<ActionResponse, ClientError>) {
        self.responses.borrow_mut().push_back(result);
    }

    pub fn get_count(&self) -> usize {
        self.get_urls.borrow().len()
    }

    pub fn post_count(&self) -> usize {
        self.post_calls.borrow().len()
    }
}

impl BatchTransport for ScriptedTransport {
    fn get_applicable(&self, url: &Url) -> Result<Vec<NodeId>, ClientError> {
        self.get_urls.borrow_mut().push(url.clone());
        self.applicable
            .borrow_mut()
            .pop_front()
            .expect("unexpected eligibility GET (nothing queued)")
    }

    fn post_action(
        &self,
        url: &Url,
        form: &[(String, String)],
    ) -> Result<ActionResponse, ClientError> {
        self.post_calls
            .borrow_mut()
            .push((url.clone(), form.to_vec()));
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("unexpected action POST (nothing queued)")
    }
}

/// A constructible transport-level error (scripted stand-in for a failed
/// request).
pub fn transport_error() -> ClientError {
    ClientError::JsonParse {
        context: "scripted failure".to_string(),
        source: serde_json::from_str::<Vec<u32>>("not json").unwrap_err(),
    }
}

/// Success response with a body parsed from JSON.
pub fn ok_response(status_message: Option<&str>, body_json: &str) -> ActionResponse {
    let body: SubmissionBody =
        serde_json::from_str(body_json).expect("test body must be valid JSON");
    ActionResponse {
        ok: true,
        status_message: status_message.map(str::to_string),
        body: Some(body),
    }
}

/// Non-success response (server answered with an error status).
pub fn error_response(status_message: Option<&str>) -> ActionResponse {
    ActionResponse {
        ok: false,
        status_message: status_message.map(str::to_string),
        body: None,
    }
}

pub fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}
