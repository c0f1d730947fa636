//! Top-level error returned by a rebalancing run.
//!
//! Every failure aborts the run immediately; the CLI reports the rendered
//! message and exits with a failure status.

use thiserror::Error;

use crate::github::GitHubError;

/// Errors surfaced while configuring or performing a rebalance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RebalanceError {
    /// No token was supplied by any configuration source.
    #[error("a GitHub token is required (use --token, REBALANCER_TOKEN, or the `token` input)")]
    MissingToken,

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request URL path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The CI event payload could not be read or did not identify a pull
    /// request.
    #[error("event context error: {message}")]
    EventContext {
        /// Details about the event payload failure.
        message: String,
    },

    /// A read call against GitHub failed.
    #[error("lookup failed: {source}")]
    Lookup {
        /// Underlying gateway failure.
        #[source]
        source: GitHubError,
    },

    /// GitHub rejected a change to the pull request's review requests.
    #[error("updating review requests failed: {source}")]
    Mutation {
        /// Underlying gateway failure.
        #[source]
        source: GitHubError,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl RebalanceError {
    /// Wraps a gateway failure raised by a read call.
    #[must_use]
    pub const fn lookup(source: GitHubError) -> Self {
        Self::Lookup { source }
    }

    /// Wraps a gateway failure raised by a mutating call.
    #[must_use]
    pub const fn mutation(source: GitHubError) -> Self {
        Self::Mutation { source }
    }
}
