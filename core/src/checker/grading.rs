use std::time::Duration;

use super::{
    normalize::{diff_hint, normalize_output},
    result::CheckResult,
};
use crate::{
    problem::{CheckType, Problem, TestCase},
    sandbox::{Execute, ExecutionResult, Sandbox},
};

/// Runs submissions through an [`Execute`] and grades them against a [`Problem`].
#[derive(Debug, Clone, Default)]
pub struct Checker<E = Sandbox> {
    executor: E,
}

impl<E: Execute> Checker<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn check(&self, code: &str, problem: &Problem, timeout: Duration) -> CheckResult {
        let res = self.executor.execute(code, timeout).await;
        self::grade(code, problem, &res)
    }

    pub async fn run_code_only(&self, code: &str, timeout: Duration) -> ExecutionResult {
        self.executor.execute(code, timeout).await
    }
}

/// Applies the grading policy to one finished run. The first matching rule wins:
/// a failed run, then `expected_output`, then `test_cases`, then "it ran".
pub fn grade(code: &str, problem: &Problem, res: &ExecutionResult) -> CheckResult {
    if !res.success {
        let result = CheckResult::incorrect("Your code encountered an error.", &res.output)
            .expected_output(problem.expected_output.clone().unwrap_or_default());
        return match &res.error {
            Some(error) => result.details(error.clone()),
            None => result,
        };
    }

    if let Some(expected) = problem.expected_output() {
        let normalized_user = normalize_output(&res.output);
        let normalized_expected = normalize_output(expected);

        return if normalized_user == normalized_expected {
            CheckResult::correct(
                "Correct! Your solution produces the expected output.",
                &res.output,
            )
            .expected_output(expected)
        } else {
            CheckResult::incorrect(
                "Not quite right. Your output doesn't match the expected output.",
                &res.output,
            )
            .expected_output(expected)
            .details(diff_hint(&normalized_user, &normalized_expected))
        };
    }

    if !problem.test_cases.is_empty() {
        return self::check_test_cases(code, &problem.test_cases, res);
    }

    if !res.output.is_empty() {
        CheckResult::correct(
            "Your code runs successfully and produces output!",
            &res.output,
        )
        .details("Note: This problem doesn't have strict output checking.")
    } else {
        CheckResult::correct("Your code runs without errors!", &res.output)
    }
}

/// All cases are judged against the single run in `res`; nothing is re-executed.
fn check_test_cases(code: &str, test_cases: &[TestCase], res: &ExecutionResult) -> CheckResult {
    for (i, t) in test_cases.iter().enumerate() {
        match t.check_type {
            CheckType::VariableExists => {
                // Purely textual: the name only has to occur somewhere in the source.
                let missing: Vec<&str> = t
                    .variables
                    .iter()
                    .map(String::as_str)
                    .filter(|var| !code.contains(*var))
                    .collect();
                if !missing.is_empty() {
                    return CheckResult::incorrect(
                        format!("Missing required variable(s): {}", missing.join(", ")),
                        &res.output,
                    )
                    .details("Make sure you've created all the required variables.");
                }
            }

            CheckType::Output => {
                let expected = t.expected.as_deref().unwrap_or_default();
                if normalize_output(&res.output) != normalize_output(expected) {
                    return CheckResult::incorrect(
                        format!("Test case {} failed.", i + 1),
                        &res.output,
                    )
                    .expected_output(expected);
                }
            }

            CheckType::Unknown => {
                log::warn!("Skipping test case {} with an unknown check_type", i + 1);
            }
        }
    }

    CheckResult::correct("All test cases passed!", &res.output)
}
