use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// HTTP client could not be constructed (bad TLS backend, etc.)
    ClientBuild { source: reqwest::Error },

    /// Request never completed (connect failure, timeout, broken pipe)
    Request { context: String, source: reqwest::Error },

    /// Response body was not the JSON shape we expected
    JsonParse { context: String, source: serde_json::Error },

    /// Action URL cannot carry path segments (cannot-be-a-base URL)
    InvalidActionUrl(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::ClientBuild { source } => {
                write!(f, "Failed to build HTTP client: {}", source)
            }
            ClientError::Request { context, source } => {
                if source.is_timeout() {
                    write!(f, "Request timed out ({}): {}", context, source)
                } else {
                    write!(f, "Request failed ({}): {}", context, source)
                }
            }
            ClientError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            ClientError::InvalidActionUrl(url) => {
                write!(f, "Action URL cannot be extended with a path: {}", url)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::ClientBuild { source } => Some(source),
            ClientError::Request { source, .. } => Some(source),
            ClientError::JsonParse { source, .. } => Some(source),
            ClientError::InvalidActionUrl(_) => None,
        }
    }
}
