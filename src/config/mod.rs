//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.rebalancer.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REBALANCER_TOKEN`, `REBALANCER_PR_URL`, ...
//! 4. **Command-line arguments** – `--token`/`-t`, `--pr-url`/`-u`, ...
//!
//! Values that are still missing afterwards fall back to what the GitHub
//! Actions runner exports: the `token` input (`INPUT_TOKEN`), `GITHUB_TOKEN`,
//! `GITHUB_REPOSITORY`, `GITHUB_API_URL`, and the event payload.
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! owner = "octocat"
//! repo = "hello-world"
//! pr_number = 42
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RebalanceError;
use crate::github::event::ActionsContext;
use crate::github::locator::{DEFAULT_API_BASE, PullRequestLocator};

/// Environment variables consulted, in order, when no token is configured.
const TOKEN_FALLBACK_VARS: [&str; 2] = ["INPUT_TOKEN", "GITHUB_TOKEN"];

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use reviewer_rebalancer::{ActionsContext, RebalancerConfig};
///
/// let config = RebalancerConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// let locator = config
///     .resolve_locator(&ActionsContext::from_env())
///     .expect("pull request required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REBALANCER",
    discovery(
        dotfile_name = ".rebalancer.toml",
        config_file_name = "rebalancer.toml",
        app_name = "rebalancer"
    )
)]
pub struct RebalancerConfig {
    /// Token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REBALANCER_TOKEN`, then `INPUT_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Pull request URL, taking priority over every other identity source.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `REBALANCER_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Repository owner, also the organization the teams belong to.
    ///
    /// Defaults to the owner half of `GITHUB_REPOSITORY`.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name.
    ///
    /// Defaults to the name half of `GITHUB_REPOSITORY`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Pull request number.
    ///
    /// Defaults to the number in the event payload at `GITHUB_EVENT_PATH`.
    #[ortho_config(cli_short = 'n')]
    pub pr_number: Option<u64>,

    /// REST API base URL, for GitHub Enterprise Server.
    ///
    /// Defaults to `GITHUB_API_URL`, then `https://api.github.com`.
    #[ortho_config()]
    pub api_url: Option<String>,
}

impl RebalancerConfig {
    /// Resolves the token from configuration, the Actions `token` input, or
    /// `GITHUB_TOKEN`. Blank values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::MissingToken`] when no source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, RebalanceError> {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                TOKEN_FALLBACK_VARS
                    .iter()
                    .filter_map(|name| env::var(name).ok())
                    .find(|token| !token.trim().is_empty())
            })
            .ok_or(RebalanceError::MissingToken)
    }

    /// Determines which pull request to rebalance.
    ///
    /// A configured `pr_url` wins outright. Otherwise owner, repository,
    /// number, and API base are resolved one by one, each from configuration
    /// first and the Actions runner context second.
    ///
    /// On a runner the API base is always `GITHUB_API_URL`: a configured
    /// `api_url` is ignored and a `pr_url` on another host is rejected, so
    /// the runner's token never leaves its own GitHub instance.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::Configuration`] naming every piece that no
    /// source provided or when `pr_url` points away from the runner's API,
    /// and propagates URL, event payload, and validation failures.
    pub fn resolve_locator(
        &self,
        context: &ActionsContext,
    ) -> Result<PullRequestLocator, RebalanceError> {
        let runner_api = context.trusted_api_url();

        if let Some(pr_url) = self.pr_url.as_deref() {
            let locator = PullRequestLocator::parse(pr_url)?;
            if let Some(expected) = runner_api {
                ensure_runner_origin(&locator, expected)?;
            }
            return Ok(locator);
        }

        let from_runner = if self.owner.is_some() && self.repo.is_some() {
            None
        } else {
            context.repository_parts()?
        };
        let (runner_owner, runner_repo) = from_runner.unzip();
        let owner = self.owner.clone().or(runner_owner);
        let repo = self.repo.clone().or(runner_repo);

        let number = match self.pr_number {
            Some(number) => Some(number),
            None => context.pull_request_number()?,
        };

        if let (Some(expected), Some(configured)) = (runner_api, self.api_url.as_deref())
            && configured != expected
        {
            tracing::warn!("ignoring api_url {configured}; this runner's API is {expected}");
        }
        let api_base = runner_api
            .or(self.api_url.as_deref())
            .or(context.api_url.as_deref())
            .unwrap_or(DEFAULT_API_BASE);

        match (owner, repo, number) {
            (Some(owner_value), Some(repo_value), Some(number_value)) => {
                PullRequestLocator::from_parts(api_base, &owner_value, &repo_value, number_value)
            }
            (owner_value, repo_value, number_value) => {
                let missing: Vec<&str> = [
                    owner_value.is_none().then_some("repository owner (--owner)"),
                    repo_value.is_none().then_some("repository name (--repo)"),
                    number_value
                        .is_none()
                        .then_some("pull request number (--pr-number)"),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(RebalanceError::Configuration {
                    message: format!(
                        "cannot identify the pull request; missing {}",
                        missing.join(", ")
                    ),
                })
            }
        }
    }
}

/// Rejects a locator whose API base is not served by the runner's API.
fn ensure_runner_origin(
    locator: &PullRequestLocator,
    expected: &str,
) -> Result<(), RebalanceError> {
    let runner = Url::parse(expected).map_err(|error| RebalanceError::EventContext {
        message: format!("GITHUB_API_URL '{expected}' is not a valid URL: {error}"),
    })?;

    if locator.api_base().origin() == runner.origin() {
        Ok(())
    } else {
        Err(RebalanceError::Configuration {
            message: format!(
                "pull request URL targets {}, but this runner's token belongs to {expected}",
                locator.api_base()
            ),
        })
    }
}

#[cfg(test)]
mod tests;
