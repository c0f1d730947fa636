//! Data models for pull request authorship and review requests.

use serde::{Deserialize, Serialize};

/// Pull request fields the rebalancer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMetadata {
    /// Author login if present.
    pub author: Option<String>,
}

/// Team requested as a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    /// Team slug, unique within the owning organization.
    pub slug: String,
}

impl TeamRef {
    /// Creates a team reference with only a slug.
    #[must_use]
    pub fn from_slug(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

/// Reviewers currently requested on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedReviewers {
    /// Individually requested user logins, in service order.
    pub users: Vec<String>,
    /// Requested teams, in service order.
    pub teams: Vec<TeamRef>,
}

impl RequestedReviewers {
    /// Slugs of every requested team, in service order.
    #[must_use]
    pub fn team_slugs(&self) -> Vec<String> {
        self.teams.iter().map(|team| team.slug.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiTeam {
    pub(super) slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiRequestedReviewers {
    pub(super) users: Vec<ApiUser>,
    pub(super) teams: Vec<ApiTeam>,
}

/// Body for `DELETE .../requested_reviewers`.
#[derive(Debug, Serialize)]
pub(super) struct RemoveReviewersBody<'a> {
    pub(super) reviewers: &'a [String],
    pub(super) team_reviewers: &'a [String],
}

/// Body for `POST .../requested_reviewers`.
#[derive(Debug, Serialize)]
pub(super) struct RequestReviewersBody<'a> {
    pub(super) reviewers: &'a [String],
}

impl From<ApiPullRequest> for PullRequestMetadata {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            author: value.user.and_then(|user| user.login),
        }
    }
}

impl From<ApiTeam> for TeamRef {
    fn from(value: ApiTeam) -> Self {
        Self { slug: value.slug }
    }
}

impl From<ApiRequestedReviewers> for RequestedReviewers {
    fn from(value: ApiRequestedReviewers) -> Self {
        Self {
            users: value
                .users
                .into_iter()
                .filter_map(|user| user.login)
                .collect(),
            teams: value.teams.into_iter().map(TeamRef::from).collect(),
        }
    }
}
