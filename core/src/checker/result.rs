use serde::Serialize;

use crate::sandbox::ExecutionResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub is_correct: bool,
    pub message: String,
    pub user_output: String,
    pub expected_output: Option<String>,
    pub details: Option<String>,
}

impl CheckResult {
    pub(crate) fn correct(message: impl Into<String>, user_output: &str) -> Self {
        Self {
            is_correct: true,
            message: message.into(),
            user_output: user_output.to_owned(),
            expected_output: None,
            details: None,
        }
    }

    pub(crate) fn incorrect(message: impl Into<String>, user_output: &str) -> Self {
        Self {
            is_correct: false,
            ..Self::correct(message, user_output)
        }
    }

    pub(crate) fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    pub(crate) fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Short verdict shown next to every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum JudgeCode {
    /// Ran cleanly; nothing was graded.
    OK,
    AC,
    WA,
    RE,
    TLE,
}

impl JudgeCode {
    pub fn of_execution(res: &ExecutionResult) -> Self {
        use JudgeCode::*;
        match (res.success, res.is_timeout()) {
            (true, _) => OK,
            (false, true) => TLE,
            (false, false) => RE,
        }
    }

    pub fn of_check(exec: &ExecutionResult, check: &CheckResult) -> Self {
        use JudgeCode::*;
        match Self::of_execution(exec) {
            OK if check.is_correct => AC,
            OK => WA,
            failed => failed,
        }
    }
}
