//! Maps Octocrab failures onto [`GitHubError`].
//!
//! Octocrab's `Display` appends the captured backtrace, so messages are built
//! from the source chain instead and always fit on one line.

use std::error::Error as _;
use std::iter;

use http::StatusCode;

use crate::github::error::GitHubError;

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> GitHubError {
    match error {
        octocrab::Error::GitHub { source, .. } => map_rejection(operation, source),
        octocrab::Error::Http { .. }
        | octocrab::Error::Hyper { .. }
        | octocrab::Error::Service { .. } => GitHubError::Network {
            message: format!("{operation} failed: {}", describe(error)),
        },
        _ => GitHubError::Api {
            message: format!("{operation} failed: {}", describe(error)),
        },
    }
}

/// Classifies a response GitHub answered with an error status.
fn map_rejection(operation: &str, rejection: &octocrab::GitHubError) -> GitHubError {
    let status = rejection.status_code;
    let message = first_line(&rejection.message).unwrap_or_default();

    if is_rate_limited(rejection) {
        GitHubError::RateLimitExceeded {
            message: format!("{operation} failed: {message}"),
        }
    } else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        GitHubError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        GitHubError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

/// A 403 or 429 whose message or documentation link mentions rate limits.
fn is_rate_limited(rejection: &octocrab::GitHubError) -> bool {
    let limited_status = matches!(
        rejection.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );
    let mentions_limit = rejection.message.to_lowercase().contains("rate limit")
        || rejection
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    limited_status && mentions_limit
}

/// Joins the first line of every cause of `error`.
fn describe(error: &octocrab::Error) -> String {
    let mut causes: Vec<String> = iter::successors(error.source(), |&cause| cause.source())
        .filter_map(|cause| first_line(&cause.to_string()))
        .collect();
    causes.dedup();

    if causes.is_empty() {
        first_line(&error.to_string()).unwrap_or_else(|| "unknown error".to_owned())
    } else {
        causes.join(": ")
    }
}

fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}
