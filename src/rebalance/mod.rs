//! Replaces team review requests with requests to the teams' members.
//!
//! A run reads the pull request author and its requested reviewers, expands
//! every requested team into its members, drops the author, withdraws the
//! team requests, and finally requests reviews from the remaining members.
//! Calls are strictly sequential and any failure aborts the run before the
//! next call is made.

mod member_set;


pub use member_set::MemberSet;

use crate::error::RebalanceError;
use crate::github::error::GitHubError;
use crate::github::gateway::ReviewerGateway;
use crate::github::locator::PullRequestLocator;
use crate::github::models::TeamRef;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebalanceOutcome {
    /// No team was requested, so nothing was changed.
    NoTeamsRequested,
    /// Team requests were replaced by individual requests.
    Rebalanced {
        /// Login of the pull request author, never requested.
        author: String,
        /// Slugs of the team requests that were withdrawn.
        removed_teams: Vec<String>,
        /// Logins that were requested individually, sorted.
        requested_reviewers: Vec<String>,
    },
}

/// Drives a rebalance through a [`ReviewerGateway`].
pub struct ReviewerRebalancer<'client, Gateway>
where
    Gateway: ReviewerGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ReviewerRebalancer<'client, Gateway>
where
    Gateway: ReviewerGateway,
{
    /// Create a rebalancer using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Rebalance the review requests of the target pull request.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::Lookup`] when reading the pull request, its
    /// requested reviewers, or a team's members fails, and
    /// [`RebalanceError::Mutation`] when GitHub rejects the withdrawal of the
    /// team requests or the new individual requests.
    pub async fn rebalance(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<RebalanceOutcome, RebalanceError> {
        let author = self.fetch_author(locator).await?;
        tracing::info!("PR author: {author}");

        let requested = self
            .client
            .requested_reviewers(locator)
            .await
            .map_err(RebalanceError::lookup)?;

        if requested.teams.is_empty() {
            tracing::info!("No teams are assigned as reviewers.");
            return Ok(RebalanceOutcome::NoTeamsRequested);
        }

        let team_slugs = requested.team_slugs();
        tracing::info!("Teams assigned as reviewers: {}", team_slugs.join(", "));

        let members = self.expand_teams(locator, &requested.teams).await?;
        tracing::info!("Team members: {}", join_logins(&members));

        let reviewers = members.without(&author).into_vec();
        tracing::info!("Filtered team members: {}", reviewers.join(", "));

        self.client
            .remove_requested_reviewers(locator, &[], &team_slugs)
            .await
            .map_err(RebalanceError::mutation)?;

        if let Err(error) = self.client.request_reviewers(locator, &reviewers).await {
            tracing::warn!(
                "team review requests for {locator} were already withdrawn; \
                 no individual reviewers were requested"
            );
            return Err(RebalanceError::mutation(error));
        }

        tracing::info!(
            "Successfully replaced team reviewers with individual team members: {}",
            reviewers.join(", ")
        );

        Ok(RebalanceOutcome::Rebalanced {
            author,
            removed_teams: team_slugs,
            requested_reviewers: reviewers,
        })
    }

    async fn fetch_author(&self, locator: &PullRequestLocator) -> Result<String, RebalanceError> {
        let metadata = self
            .client
            .pull_request(locator)
            .await
            .map_err(RebalanceError::lookup)?;

        metadata.author.ok_or_else(|| {
            RebalanceError::lookup(GitHubError::Api {
                message: format!("pull request {locator} has no author login"),
            })
        })
    }

    async fn expand_teams(
        &self,
        locator: &PullRequestLocator,
        teams: &[TeamRef],
    ) -> Result<MemberSet, RebalanceError> {
        let org = locator.owner().as_str();
        let mut members = MemberSet::new();

        for team in teams {
            tracing::info!(
                "Fetching members for team slug: {} in organization: {org}",
                team.slug
            );
            let logins = self
                .client
                .team_members(org, &team.slug)
                .await
                .map_err(RebalanceError::lookup)?;
            tracing::info!("Fetched {} members for team: {}", logins.len(), team.slug);
            members.extend(logins);
        }

        Ok(members)
    }
}

fn join_logins(members: &MemberSet) -> String {
    members.logins().collect::<Vec<_>>().join(", ")
}
