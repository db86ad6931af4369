use thiserror::Error;

/// Everything that can go wrong while talking to the BLS API.
#[derive(Debug, Error)]
pub enum BlsError {
    /// DNS, connect, TLS or timeout failure during the HTTP exchange.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// The request could not be turned into JSON.
    #[error("could not encode request: {0}")]
    Encode(#[source] serde_json::Error),
    /// The body is not JSON, or `Results.series[0].data` is missing from it.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Writing the report failed.
    #[error("console write failed: {0}")]
    Console(#[source] std::io::Error),
    /// An observation lacks a field needed for clean-up.
    #[error("malformed observation: {0}")]
    MalformedObservation(String),
}

impl BlsError {
    /// True for failures of the exchange itself, where no response body was parsed.
    pub fn is_transport(&self) -> bool {
        matches!(self, BlsError::Transport(_) | BlsError::Status(_))
    }
}
