//! GitHub access for reading and rewriting review requests.
//!
//! This module wraps Octocrab behind the [`ReviewerGateway`] trait, provides
//! identity wrappers for the target pull request, and reads the pull request
//! context exported by the GitHub Actions runner. Octocrab failures are mapped
//! into [`GitHubError`] so callers never see Octocrab internals.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::GitHubError;
pub use event::ActionsContext;
pub use gateway::{OctocrabReviewerGateway, ReviewerGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner,
};
pub use models::{PullRequestMetadata, RequestedReviewers, TeamRef};

#[cfg(test)]
pub use gateway::MockReviewerGateway;
