//! Error types for the chat client and the per-file processing step.
//!
//! Fatal conditions (bad config, missing credential) surface to the CLI as
//! `anyhow` errors; everything in [`ProcessError`] is recoverable and only
//! ever ends up in a [`crate::process::FileOutcome::SkippedError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while talking to the chat-completion endpoint.
#[derive(Debug, Error)]
pub enum ChatError {
    /// `GITHUB_TOKEN` is unset or empty. Raised before any request is sent.
    #[error("GITHUB_TOKEN environment variable not set")]
    MissingCredential,

    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure: DNS, connect, timeout, body read.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not have the `choices[0].message.content` shape.
    #[error("failed to parse API response: {reason}")]
    MalformedResponse { reason: String, body: String },
}

/// Errors that abort a single file. The batch carries on with the next one.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Chat(#[from] ChatError),
}
