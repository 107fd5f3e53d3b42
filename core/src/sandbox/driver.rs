//! The Python program that runs inside every sandbox child.
//!
//! The child is started as `python3 -I -u -c BOOTSTRAP <driver source>`. The driver
//! reads one [`Payload`] from stdin, runs the submission in a fresh namespace and
//! writes one [`Report`] as the last line of stderr.

use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{result::ExecutionResult, traceback};
use crate::assets;

/// Compiles the driver under its own file name so its frames can be told apart
/// from the submission's (`<string>`).
pub const BOOTSTRAP: &str = "import sys; exec(compile(sys.argv[1], '<driver>', 'exec'))";

static SOURCE: Lazy<String> = Lazy::new(|| assets::text(assets::DRIVER_FILENAME).into_owned());

pub fn source() -> &'static str {
    &SOURCE
}

#[derive(Debug, Clone, Serialize)]
pub struct Payload<'a> {
    pub code: &'a str,
    /// `Some` replaces `input()` with one that pops from these lines.
    pub input: Option<&'a [String]>,
    pub stderr_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaisedError {
    pub kind: String,
    pub message: String,
    pub traceback: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub status: ReportStatus,
    pub elapsed: f64,
    #[serde(default)]
    pub stderr: String,
    pub error: Option<RaisedError>,
}

impl Report {
    /// Finds the report on the last non-empty line of the child's stderr.
    pub fn parse_from_stderr(stderr: &str) -> Option<Self> {
        let line = stderr.lines().rev().find(|l| !l.trim().is_empty())?;
        serde_json::from_str(line).ok()
    }

    pub fn elapsed(&self) -> Duration {
        if self.elapsed.is_finite() && self.elapsed > 0.0 {
            Duration::from_secs_f64(self.elapsed)
        } else {
            Duration::ZERO
        }
    }

    pub fn into_result(self, output: String) -> ExecutionResult {
        let elapsed = self.elapsed();
        match (self.status, self.error) {
            (ReportStatus::Ok, _) => ExecutionResult::completed(output, elapsed),
            (ReportStatus::Error, Some(e)) => {
                let report = traceback::filter_submission_frames(&e.traceback);
                ExecutionResult::runtime_fault(output, e.kind, e.message, report, elapsed)
            }
            (ReportStatus::Error, None) => ExecutionResult::runtime_fault(
                output,
                "SandboxError",
                "the driver reported an error without details",
                "",
                elapsed,
            ),
        }
    }
}

/// Splits simulated stdin the way the `input()` shim consumes it.
///
/// ```
/// use pycoach_core::sandbox::driver::split_input_lines;
///
/// assert_eq!(split_input_lines("3\n4\n"), vec!["3", "4"]);
/// assert!(split_input_lines("  \n").is_empty());
/// ```
pub fn split_input_lines(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_owned).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sandbox::Fault;

    #[test]
    fn report_is_taken_from_the_last_line() {
        let stderr = concat!(
            "some noise\n",
            "\n",
            r#"{"status": "ok", "elapsed": 0.25, "stderr": "warn\n", "error": null}"#,
            "\n"
        );
        let report = Report::parse_from_stderr(stderr).unwrap();
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(report.stderr, "warn\n");
        assert_eq!(report.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn garbage_stderr_has_no_report() {
        assert_eq!(Report::parse_from_stderr("Segmentation fault\n"), None);
        assert_eq!(Report::parse_from_stderr(""), None);
    }

    #[test]
    fn error_report_becomes_runtime_fault() {
        let report = Report {
            status: ReportStatus::Error,
            elapsed: 0.01,
            stderr: String::new(),
            error: Some(RaisedError {
                kind: "ZeroDivisionError".into(),
                message: "division by zero".into(),
                traceback: concat!(
                    "Traceback (most recent call last):\n",
                    "  File \"<driver>\", line 50, in main\n",
                    "    exec(code, namespace)\n",
                    "  File \"<string>\", line 1, in <module>\n",
                    "    1 / 0\n",
                    "ZeroDivisionError: division by zero\n",
                )
                .into(),
            }),
        };

        let res = report.into_result("before\n".into());
        assert!(!res.success);
        assert_eq!(res.output, "before\n");
        assert_eq!(
            res.error.as_deref(),
            Some(concat!(
                "Traceback (most recent call last):\n",
                "  File \"<string>\", line 1, in <module>\n",
                "    1 / 0\n",
                "ZeroDivisionError: division by zero",
            ))
        );
        assert!(matches!(res.fault, Some(Fault::Runtime { ref kind, .. }) if kind == "ZeroDivisionError"));
    }

    #[test]
    fn payload_serializes_input_as_list_or_null() {
        let lines = split_input_lines("a\nb");
        let with = Payload {
            code: "print(1)",
            input: Some(&lines),
            stderr_limit: 10,
        };
        let without = Payload {
            input: None,
            ..with.clone()
        };
        assert_eq!(
            serde_json::to_string(&with).unwrap(),
            r#"{"code":"print(1)","input":["a","b"],"stderr_limit":10}"#
        );
        assert_eq!(
            serde_json::to_string(&without).unwrap(),
            r#"{"code":"print(1)","input":null,"stderr_limit":10}"#
        );
    }
}
