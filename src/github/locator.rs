//! Identity wrappers for the pull request being rebalanced.

use url::Url;

use crate::error::RebalanceError;

/// Public GitHub REST API base used when no other base is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
///
/// The owner doubles as the organization that team slugs are resolved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, RebalanceError> {
        if value.is_empty() {
            return Err(RebalanceError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, RebalanceError> {
        if value.is_empty() {
            return Err(RebalanceError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, RebalanceError> {
        if value == 0 {
            return Err(RebalanceError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, RebalanceError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RebalanceError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

// Keep the secret out of debug output.
impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, RebalanceError> {
    if host.eq_ignore_ascii_case("github.com") {
        Url::parse(DEFAULT_API_BASE).map_err(|error| RebalanceError::InvalidUrl(error.to_string()))
    } else {
        let authority = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(|error| RebalanceError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| RebalanceError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// Pull request identity plus the API base it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Parses a GitHub pull request URL in the form
    /// `https://github.com/<owner>/<repo>/pull/<number>`.
    ///
    /// # Errors
    ///
    /// Returns `RebalanceError::InvalidUrl` when parsing fails,
    /// `MissingPathSegments` when the URL path is not
    /// `/owner/repo/pull/<number>`, and `InvalidPullRequestNumber` when the
    /// final segment is not a positive integer.
    pub fn parse(input: &str) -> Result<Self, RebalanceError> {
        let parsed =
            Url::parse(input).map_err(|error| RebalanceError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(RebalanceError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(RebalanceError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(RebalanceError::MissingPathSegments)?;
        let marker = segments.next().ok_or(RebalanceError::MissingPathSegments)?;
        let number_segment = segments.next().ok_or(RebalanceError::MissingPathSegments)?;

        if marker != "pull" || number_segment.is_empty() {
            return Err(RebalanceError::MissingPathSegments);
        }

        let number_value = number_segment
            .parse::<u64>()
            .map_err(|_| RebalanceError::InvalidPullRequestNumber)?;

        let host = parsed
            .host_str()
            .ok_or_else(|| RebalanceError::InvalidUrl("URL must include a host".to_owned()))?;

        Ok(Self {
            api_base: derive_api_base_from_host(parsed.scheme(), host, parsed.port())?,
            owner: RepositoryOwner::new(owner_segment)?,
            repository: RepositoryName::new(repository_segment)?,
            number: PullRequestNumber::new(number_value)?,
        })
    }

    /// Builds a locator from already separated parts.
    ///
    /// # Errors
    ///
    /// Returns `RebalanceError::InvalidUrl` when `api_base` is not a URL,
    /// `MissingPathSegments` when owner or repository is empty, and
    /// `InvalidPullRequestNumber` for a zero number.
    pub fn from_parts(
        api_base: &str,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> Result<Self, RebalanceError> {
        let base =
            Url::parse(api_base).map_err(|error| RebalanceError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            api_base: base,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: PullRequestNumber::new(number)?,
        })
    }

    /// API base URL the gateway talks to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner, also the organization that owns requested teams.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn requested_reviewers_path(&self) -> String {
        format!("{}/requested_reviewers", self.pull_request_path())
    }
}

impl std::fmt::Display for PullRequestLocator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}/{}#{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}
