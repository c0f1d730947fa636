//! Pull request context supplied by the GitHub Actions runner.
//!
//! The runner exports the repository slug, the API endpoint, and the path of
//! a JSON file holding the triggering event. The pull request number is read
//! from that payload the same way for `pull_request`, `pull_request_target`,
//! and `issue_comment` events.

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use crate::error::RebalanceError;

/// Values read from the Actions runner environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsContext {
    /// `GITHUB_REPOSITORY`, in `owner/repo` form.
    pub repository: Option<String>,
    /// `GITHUB_EVENT_PATH`, the event payload file.
    pub event_path: Option<Utf8PathBuf>,
    /// `GITHUB_API_URL`, set for both github.com and Enterprise runners.
    pub api_url: Option<String>,
    /// Whether `GITHUB_ACTIONS` marks this process as a workflow step.
    pub on_runner: bool,
}

#[derive(Debug, Default, Deserialize)]
struct NumberedItem {
    number: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventPayload {
    issue: Option<NumberedItem>,
    pull_request: Option<NumberedItem>,
    number: Option<u64>,
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Returns true when running as a GitHub Actions step.
#[must_use]
pub fn running_in_actions() -> bool {
    env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

impl ActionsContext {
    /// Captures the runner variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            repository: non_blank_var("GITHUB_REPOSITORY"),
            event_path: non_blank_var("GITHUB_EVENT_PATH").map(Utf8PathBuf::from),
            api_url: non_blank_var("GITHUB_API_URL"),
            on_runner: running_in_actions(),
        }
    }

    /// The API endpoint the runner's token belongs to.
    ///
    /// Only set on a runner. Requests carrying the runner's token must not go
    /// anywhere else, whatever the checked-out configuration says.
    #[must_use]
    pub fn trusted_api_url(&self) -> Option<&str> {
        self.api_url.as_deref().filter(|_| self.on_runner)
    }

    /// Splits `GITHUB_REPOSITORY` into owner and repository name.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::EventContext`] when the value is not of the
    /// form `owner/repo`.
    pub fn repository_parts(&self) -> Result<Option<(String, String)>, RebalanceError> {
        let Some(slug) = self.repository.as_deref() else {
            return Ok(None);
        };

        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Some((owner.to_owned(), repo.to_owned())))
            }
            _ => Err(RebalanceError::EventContext {
                message: format!("GITHUB_REPOSITORY must be owner/repo, got '{slug}'"),
            }),
        }
    }

    /// Reads the pull request number from the event payload, if a payload
    /// path is known.
    ///
    /// # Errors
    ///
    /// Returns [`RebalanceError::Io`] when the payload file cannot be read and
    /// [`RebalanceError::EventContext`] when it is not valid JSON.
    pub fn pull_request_number(&self) -> Result<Option<u64>, RebalanceError> {
        let Some(path) = self.event_path.as_deref() else {
            return Ok(None);
        };
        let payload = read_event_payload(path)?;
        number_from_payload(&payload)
    }
}

/// Extracts the issue or pull request number from an event payload.
///
/// # Errors
///
/// Returns [`RebalanceError::EventContext`] when `payload` is not valid JSON.
pub fn number_from_payload(payload: &str) -> Result<Option<u64>, RebalanceError> {
    let event: EventPayload =
        serde_json::from_str(payload).map_err(|error| RebalanceError::EventContext {
            message: format!("event payload is not valid JSON: {error}"),
        })?;

    Ok(event
        .issue
        .and_then(|issue| issue.number)
        .or_else(|| event.pull_request.and_then(|pull| pull.number))
        .or(event.number))
}

fn read_event_payload(path: &Utf8Path) -> Result<String, RebalanceError> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| RebalanceError::Io {
        message: format!("invalid event path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        RebalanceError::Io {
            message: format!("failed to open event directory '{parent}': {error}"),
        }
    })?;

    dir.read_to_string(file_name)
        .map_err(|error| RebalanceError::Io {
            message: format!("failed to read event payload '{path}': {error}"),
        })
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::{ActionsContext, number_from_payload};
    use crate::error::RebalanceError;

    #[rstest]
    #[case::pull_request_event(r#"{"action":"review_requested","pull_request":{"number":7}}"#, Some(7))]
    #[case::issue_comment_event(r#"{"issue":{"number":12},"pull_request":{"number":99}}"#, Some(12))]
    #[case::top_level_number(r#"{"number":3}"#, Some(3))]
    #[case::push_event(r#"{"ref":"refs/heads/main"}"#, None)]
    fn reads_number_from_payload(#[case] payload: &str, #[case] expected: Option<u64>) {
        let number = number_from_payload(payload).expect("payload should parse");
        assert_eq!(number, expected);
    }

    #[rstest]
    fn rejects_malformed_payload() {
        let result = number_from_payload("{not json");
        assert!(
            matches!(result, Err(RebalanceError::EventContext { .. })),
            "expected EventContext, got {result:?}"
        );
    }

    #[rstest]
    fn splits_repository_slug() {
        let context = ActionsContext {
            repository: Some("octo/repo".to_owned()),
            ..ActionsContext::default()
        };

        let parts = context.repository_parts().expect("slug should split");
        assert_eq!(parts, Some(("octo".to_owned(), "repo".to_owned())));
    }

    #[rstest]
    #[case::missing_repo("octo/")]
    #[case::missing_owner("/repo")]
    #[case::no_separator("octo")]
    #[case::nested("octo/repo/extra")]
    fn rejects_malformed_repository_slug(#[case] slug: &str) {
        let context = ActionsContext {
            repository: Some(slug.to_owned()),
            ..ActionsContext::default()
        };

        let result = context.repository_parts();
        assert!(
            matches!(result, Err(RebalanceError::EventContext { .. })),
            "expected EventContext for '{slug}', got {result:?}"
        );
    }

    #[rstest]
    fn reads_number_from_event_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("event.json"))
            .expect("temp path should be UTF-8");
        std::fs::write(&path, r#"{"pull_request":{"number":42}}"#)
            .expect("event file should be written");

        let context = ActionsContext {
            event_path: Some(path),
            ..ActionsContext::default()
        };

        assert_eq!(
            context.pull_request_number().expect("event should be read"),
            Some(42)
        );
    }

    #[rstest]
    fn reports_missing_event_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("temp path should be UTF-8");

        let context = ActionsContext {
            event_path: Some(path),
            ..ActionsContext::default()
        };

        let result = context.pull_request_number();
        assert!(
            matches!(result, Err(RebalanceError::Io { .. })),
            "expected Io error, got {result:?}"
        );
    }

    #[rstest]
    fn absent_context_yields_nothing() {
        let context = ActionsContext::default();
        assert_eq!(context.repository_parts().expect("no slug is fine"), None);
        assert_eq!(context.pull_request_number().expect("no path is fine"), None);
    }
}
