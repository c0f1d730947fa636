//! Octocrab client construction for the reviewer gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::error::RebalanceError;
use crate::github::locator::PersonalAccessToken;

/// Builds an authenticated Octocrab client for the given API base URL.
///
/// # Errors
///
/// Returns `RebalanceError::InvalidUrl` when the base URI cannot be parsed or
/// `RebalanceError::Configuration` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, RebalanceError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| RebalanceError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| RebalanceError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| RebalanceError::Configuration {
            message: format!("build client failed: {error}"),
        })
}
