// Error types shared across the crate. Library functions return these so
// callers (and tests) can match on the failure kind; `main` converts them
// into an `anyhow` exit message.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No config file exists yet for this user.
    #[error("no instance configured; run `put instance set <uri>` or any command to be prompted")]
    ConfigNotFound,

    #[error("config file is not valid JSON: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("could not write config file: {0}")]
    ConfigWrite(#[source] std::io::Error),

    #[error("could not resolve the current user's home directory")]
    NoHomeDir,

    #[error("invalid instance URI: must be https, or http with --unsecure")]
    InvalidUriScheme,

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The handshake reached a server, but it did not answer like a PUT
    /// instance (bad status, unparsable body, or wrong verifier token).
    #[error("not a valid PUT instance: {0}")]
    Verification(String),

    /// A file operation got a response other than 200 OK.
    #[error("server returned {0}")]
    UnexpectedStatus(StatusCode),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
