use std::time::Duration;

use serde::Serialize;

/// Why a run did not complete successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fault {
    /// The submitted code raised (or the interpreter itself died).
    Runtime { kind: String, message: String },
    /// The run was killed after `limit_secs`.
    Timeout { limit_secs: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub output: String,
    pub error: Option<String>,
    /// Seconds.
    pub execution_time: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

impl ExecutionResult {
    pub fn completed(output: String, elapsed: Duration) -> Self {
        Self {
            output,
            error: None,
            execution_time: elapsed.as_secs_f64(),
            success: true,
            fault: None,
        }
    }

    /// `report` is what the learner sees in `error`: usually a filtered traceback
    /// ending with `"<kind>: <message>"`. When empty, that last line alone is used.
    pub fn runtime_fault(
        output: String,
        kind: impl Into<String>,
        message: impl Into<String>,
        report: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        let kind = kind.into();
        let message = message.into();
        let report = report.into();
        let error = if report.trim().is_empty() {
            format!("{}: {}", kind, message)
        } else {
            report
        };
        Self {
            output,
            error: Some(error),
            execution_time: elapsed.as_secs_f64(),
            success: false,
            fault: Some(Fault::Runtime { kind, message }),
        }
    }

    pub fn timeout(output: String, limit: Duration) -> Self {
        let limit_secs = limit.as_secs_f64();
        Self {
            output,
            error: Some(format!(
                "Timeout: Code execution exceeded {:?} seconds. Possible infinite loop?",
                limit_secs
            )),
            execution_time: limit_secs,
            success: false,
            fault: Some(Fault::Timeout { limit_secs }),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.execution_time.max(0.0))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.fault, Some(Fault::Timeout { .. }))
    }
}
