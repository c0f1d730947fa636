//! Reviewer rebalancing for GitHub pull requests.
//!
//! When teams are requested to review a pull request, the crate expands each
//! team into its members, withdraws the team requests, and requests reviews
//! from the members individually, leaving out the pull request author. GitHub
//! is reached through Octocrab behind the [`ReviewerGateway`] trait.

pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod rebalance;
pub mod report;

pub use config::RebalancerConfig;
pub use error::RebalanceError;
pub use github::{
    ActionsContext, GitHubError, OctocrabReviewerGateway, PersonalAccessToken, PullRequestLocator,
    ReviewerGateway,
};
pub use rebalance::{MemberSet, RebalanceOutcome, ReviewerRebalancer};
