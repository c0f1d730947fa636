//! Failure reporting for the CLI.
//!
//! A failed run is reported twice: as a plain line on stderr, and on Actions
//! runners as an `::error::` workflow command on stdout so the step gets an
//! annotation.

use std::io::{self, Write};

use crate::error::RebalanceError;

/// Human-readable failure line.
#[must_use]
pub fn failure_message(error: &RebalanceError) -> String {
    format!("Action failed with error: {error}")
}

/// Escapes a workflow command payload as the runner expects.
fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats an `::error::` workflow command for `message`.
#[must_use]
pub fn workflow_error_command(message: &str) -> String {
    format!("::error::{}", escape_command_data(message))
}

/// Writes the failure line to `diagnostics` and, when `annotate` is set, the
/// workflow command to `annotations`.
///
/// The failure line is written even when the annotation cannot be.
///
/// # Errors
///
/// Returns the first I/O error raised by either writer.
pub fn write_failure<Annotations, Diagnostics>(
    error: &RebalanceError,
    annotate: bool,
    annotations: &mut Annotations,
    diagnostics: &mut Diagnostics,
) -> io::Result<()>
where
    Annotations: Write,
    Diagnostics: Write,
{
    let message = failure_message(error);
    let annotated = if annotate {
        writeln!(annotations, "{}", workflow_error_command(&message))
    } else {
        Ok(())
    };
    writeln!(diagnostics, "{message}")?;
    annotated
}

/// Reports the failure on the process streams: the line on stderr and the
/// annotation on stdout.
///
/// # Errors
///
/// Returns the underlying I/O error when either stream cannot be written.
pub fn report_failure(error: &RebalanceError, annotate: bool) -> io::Result<()> {
    write_failure(
        error,
        annotate,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use std::io::{self, Write};

    use super::{failure_message, workflow_error_command, write_failure};
    use crate::error::RebalanceError;
    use crate::github::GitHubError;

    #[rstest]
    fn failure_message_carries_error_detail() {
        let error = RebalanceError::lookup(GitHubError::Api {
            message: "team members for acme/ghost failed with status 404: Not Found".to_owned(),
        });

        assert_eq!(
            failure_message(&error),
            "Action failed with error: lookup failed: GitHub API error: team members for \
             acme/ghost failed with status 404: Not Found"
        );
    }

    #[rstest]
    #[case::plain("boom", "::error::boom")]
    #[case::percent("100% broken", "::error::100%25 broken")]
    #[case::multiline("first\r\nsecond", "::error::first%0D%0Asecond")]
    fn escapes_workflow_command_data(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(workflow_error_command(message), expected);
    }

    struct ClosedStream;

    impl Write for ClosedStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn missing_token() -> RebalanceError {
        RebalanceError::MissingToken
    }

    #[rstest]
    fn annotated_failure_writes_both_streams() {
        let mut annotations = Vec::new();
        let mut diagnostics = Vec::new();

        write_failure(&missing_token(), true, &mut annotations, &mut diagnostics)
            .expect("both streams should accept the report");

        let expected = failure_message(&missing_token());
        assert_eq!(
            String::from_utf8(annotations).expect("annotation should be UTF-8"),
            format!("{}\n", workflow_error_command(&expected))
        );
        assert_eq!(
            String::from_utf8(diagnostics).expect("diagnostics should be UTF-8"),
            format!("{expected}\n")
        );
    }

    #[rstest]
    fn failure_line_survives_a_closed_annotation_stream() {
        let mut diagnostics = Vec::new();

        let result = write_failure(&missing_token(), true, &mut ClosedStream, &mut diagnostics);

        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(diagnostics).expect("diagnostics should be UTF-8"),
            format!("{}\n", failure_message(&missing_token()))
        );
    }

    #[rstest]
    fn plain_failure_skips_the_annotation() {
        let mut annotations = Vec::new();
        let mut diagnostics = Vec::new();

        write_failure(&missing_token(), false, &mut annotations, &mut diagnostics)
            .expect("diagnostics should accept the report");

        assert!(annotations.is_empty());
        assert!(!diagnostics.is_empty());
    }
}
