//! Octocrab implementation of the reviewer gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::Serialize;

use crate::error::RebalanceError;
use crate::github::error::GitHubError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::{
    ApiPullRequest, ApiRequestedReviewers, ApiUser, PullRequestMetadata, RemoveReviewersBody,
    RequestReviewersBody, RequestedReviewers,
};

use super::ReviewerGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// GitHub's maximum page size for member listings.
const MEMBERS_PER_PAGE: u8 = 100;

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
}

fn team_members_path(org: &str, team_slug: &str) -> String {
    format!("/orgs/{org}/teams/{team_slug}/members")
}

/// Octocrab-backed reviewer gateway.
pub struct OctocrabReviewerGateway {
    client: Octocrab,
}

impl OctocrabReviewerGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and the API base of the
    /// pull request locator.
    ///
    /// # Errors
    ///
    /// Returns `RebalanceError::InvalidUrl` when the base URI cannot be parsed
    /// or `RebalanceError::Configuration` when Octocrab fails to construct a
    /// client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, RebalanceError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ReviewerGateway for OctocrabReviewerGateway {
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GitHubError> {
        self.client
            .get::<ApiPullRequest, _, _>(locator.pull_request_path(), None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("pull request", &error))
    }

    async fn requested_reviewers(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<RequestedReviewers, GitHubError> {
        self.client
            .get::<ApiRequestedReviewers, _, _>(locator.requested_reviewers_path(), None::<&()>)
            .await
            .map(ApiRequestedReviewers::into)
            .map_err(|error| map_octocrab_error("requested reviewers", &error))
    }

    async fn team_members(
        &self,
        org: &str,
        team_slug: &str,
    ) -> Result<Vec<String>, GitHubError> {
        let path = team_members_path(org, team_slug);
        let operation = format!("team members for {org}/{team_slug}");
        tracing::debug!("GET {path}");

        let page = self
            .client
            .get::<Page<ApiUser>, _, _>(
                &path,
                Some(&PageParams {
                    per_page: MEMBERS_PER_PAGE,
                }),
            )
            .await
            .map_err(|error| map_octocrab_error(&operation, &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|members| members.into_iter().filter_map(|user| user.login).collect())
            .map_err(|error| map_octocrab_error(&operation, &error))
    }

    async fn remove_requested_reviewers(
        &self,
        locator: &PullRequestLocator,
        users: &[String],
        team_slugs: &[String],
    ) -> Result<(), GitHubError> {
        let body = RemoveReviewersBody {
            reviewers: users,
            team_reviewers: team_slugs,
        };
        tracing::debug!("DELETE {}", locator.requested_reviewers_path());

        let _updated: ApiPullRequest = self
            .client
            .delete(locator.requested_reviewers_path(), Some(&body))
            .await
            .map_err(|error| map_octocrab_error("remove requested reviewers", &error))?;
        Ok(())
    }

    async fn request_reviewers(
        &self,
        locator: &PullRequestLocator,
        users: &[String],
    ) -> Result<(), GitHubError> {
        let body = RequestReviewersBody { reviewers: users };
        tracing::debug!("POST {}", locator.requested_reviewers_path());

        let _updated: ApiPullRequest = self
            .client
            .post(locator.requested_reviewers_path(), Some(&body))
            .await
            .map_err(|error| map_octocrab_error("request reviewers", &error))?;
        Ok(())
    }
}
