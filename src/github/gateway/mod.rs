//! Gateway for reading and changing pull request review requests.
//!
//! The [`ReviewerGateway`] trait is the seam the rebalancer depends on; the
//! Octocrab implementation performs the real HTTP requests and tests swap in
//! the generated mock.

mod client;
mod error_mapping;
mod reviewers;


pub use reviewers::OctocrabReviewerGateway;

use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{PullRequestMetadata, RequestedReviewers};

/// Review-management operations the rebalancer needs from GitHub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewerGateway: Send + Sync {
    /// Fetch the pull request metadata, including its author.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GitHubError>;

    /// Fetch the users and teams currently requested as reviewers.
    async fn requested_reviewers(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<RequestedReviewers, GitHubError>;

    /// List the logins of every member of `team_slug` in `org`.
    async fn team_members(
        &self,
        org: &str,
        team_slug: &str,
    ) -> Result<Vec<String>, GitHubError>;

    /// Withdraw review requests from the given users and teams.
    async fn remove_requested_reviewers(
        &self,
        locator: &PullRequestLocator,
        users: &[String],
        team_slugs: &[String],
    ) -> Result<(), GitHubError>;

    /// Request reviews from the given users.
    async fn request_reviewers(
        &self,
        locator: &PullRequestLocator,
        users: &[String],
    ) -> Result<(), GitHubError>;
}
