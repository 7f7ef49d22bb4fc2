use std::time::Duration;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::client::error::ClientError;
use crate::submit::submit_model::SubmissionBody;
use crate::tree::tree_model::NodeId;

/// Header carrying the server's human-readable status line. HTTP headers
/// cannot carry multibyte characters, so the server percent-encodes UTF-8.
const STATUS_HEADER: &str = "X-Status";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outcome of one batch-action POST, as seen at the transport level.
///
/// `ok: false` means the server answered with a non-success status; `Err`
/// from the transport is reserved for requests that never completed
/// (connect failure, timeout).
#[derive(Debug)]
pub struct ActionResponse {
    pub ok: bool,
    /// Decoded X-Status header, when the server sent one.
    pub status_message: Option<String>,
    /// Parsed body; `None` on error responses or unparseable bodies.
    pub body: Option<SubmissionBody>,
}

/// The two network operations in the whole flow: one eligibility GET, one
/// batch-action POST. Everything above this trait is network-free, so
/// tests drive the coordinator with a scripted implementation.
pub trait BatchTransport {
    /// `GET <actionURL>/applicablepages/?...&csvIDs=...` → eligible ids.
    fn get_applicable(&self, url: &Url) -> Result<Vec<NodeId>, ClientError>;

    /// `POST <actionURL>` with the form-encoded submission payload.
    fn post_action(
        &self,
        url: &Url,
        form: &[(String, String)],
    ) -> Result<ActionResponse, ClientError>;
}

/// Live transport over a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::ClientBuild { source })?;
        Ok(HttpTransport { client })
    }

    pub fn with_default_timeout() -> Result<Self, ClientError> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl BatchTransport for HttpTransport {
    fn get_applicable(&self, url: &Url) -> Result<Vec<NodeId>, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ClientError::Request {
                context: format!("GET {}", url),
                source,
            })?;

        let text = response.text().map_err(|source| ClientError::Request {
            context: format!("reading body of GET {}", url),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ClientError::JsonParse {
            context: format!("eligible id list from {}", url),
            source,
        })
    }

    fn post_action(
        &self,
        url: &Url,
        form: &[(String, String)],
    ) -> Result<ActionResponse, ClientError> {
        let response = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .map_err(|source| ClientError::Request {
                context: format!("POST {}", url),
                source,
            })?;

        let ok = response.status().is_success();
        let status_message = decode_status_header(&response);

        let text = response.text().map_err(|source| ClientError::Request {
            context: format!("reading body of POST {}", url),
            source,
        })?;

        // An error response or a body we cannot parse still reconciles; it
        // just carries no per-node detail.
        let body = if ok {
            serde_json::from_str::<SubmissionBody>(&text).ok()
        } else {
            None
        };

        Ok(ActionResponse {
            ok,
            status_message,
            body,
        })
    }
}

fn decode_status_header(response: &reqwest::blocking::Response) -> Option<String> {
    let raw = response.headers().get(STATUS_HEADER)?.to_str().ok()?;
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
