pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use error::*;
use serde::Serialize;

use crate::catalog::ProblemCatalog;
use crate::checker::{self, CheckResult, Checker, JudgeCode};
use crate::config::Config;
use crate::interactive::{self, SpinnerExt};
use crate::problem::Problem;
use crate::progress::ProgressStore;
use crate::sandbox::{Execute, ExecutionResult};

pub fn init_config(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let filepath = dir.as_ref().join(Config::FILENAME);
    ensure!(
        !filepath.exists(),
        "Config file already exists: {}",
        filepath.to_string_lossy()
    );
    fsutil::write_with_mkdir(&filepath, Config::example_toml())
        .context("Failed to write example config")?;
    Ok(filepath)
}

pub fn load_catalog(cfg: &Config) -> Result<ProblemCatalog> {
    match cfg.problems_file() {
        Some(path) => ProblemCatalog::from_json_file(&path)
            .with_context(|| format!("Failed to load problems from {:?}", path)),
        None => ProblemCatalog::builtin().context("Failed to load the built-in problems"),
    }
}

pub fn find_problem<'c>(catalog: &'c ProblemCatalog, problem_id: &str) -> Result<&'c Problem> {
    catalog
        .get(problem_id)
        .with_context(|| format!("No such problem: '{}'", problem_id))
}

pub fn open_progress(cfg: &Config) -> ProgressStore {
    ProgressStore::open(cfg.progress_file())
}

pub fn read_program_file(program_file: impl AsRef<Path>) -> Result<String> {
    fsutil::read_to_string(&program_file)
        .with_context(|| format!("Cannot read program {:?}", program_file.as_ref()))
}

async fn with_spinner<F: Future>(msg: &str, enabled: bool, fut: F) -> F::Output {
    if !enabled {
        return fut.await;
    }
    let spinner = interactive::new_spinner(msg).with_ticking();
    let output = fut.await;
    spinner.lock().await.finish_and_clear();
    output
}

pub async fn run_code<E: Execute>(
    executor: &E,
    code: &str,
    input: Option<&str>,
    timeout: Duration,
    show_spinner: bool,
) -> ExecutionResult {
    let fut = async {
        match input {
            Some(input) => executor.execute_with_input(code, input, timeout).await,
            None => executor.execute(code, timeout).await,
        }
    };
    with_spinner("Running ...", show_spinner, fut).await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub problem_id: String,
    pub judge: JudgeCode,
    #[serde(flatten)]
    pub result: CheckResult,
    /// True only the first time this problem is solved.
    pub newly_completed: bool,
    /// `None` when nothing had to be saved.
    pub progress_saved: Option<bool>,
}

/// Grades `code` and, when it is correct, records the problem as completed.
pub async fn check_and_record<E: Execute>(
    checker: &Checker<E>,
    progress: &mut ProgressStore,
    problem: &Problem,
    code: &str,
    timeout: Duration,
    show_spinner: bool,
) -> CheckOutcome {
    let exec = with_spinner(
        &format!("Checking {} ...", problem.id),
        show_spinner,
        checker.run_code_only(code, timeout),
    )
    .await;
    let result = checker::grade(code, problem, &exec);
    let judge = JudgeCode::of_check(&exec, &result);

    let (newly_completed, progress_saved) = if result.is_correct {
        let newly_completed = !progress.is_completed(&problem.id);
        let saved = progress.mark_completed(&problem.id);
        if !saved {
            log::warn!(
                "'{}' was solved, but progress could not be saved to {:?}",
                problem.id,
                progress.save_path()
            );
        }
        (newly_completed, Some(saved))
    } else {
        (false, None)
    };

    CheckOutcome {
        problem_id: problem.id.clone(),
        judge,
        result,
        newly_completed,
        progress_saved,
    }
}

/// Reveals one more hint. Returns the 1-based number and text of the hint,
/// or `None` once every hint has been shown.
pub fn reveal_next_hint<'p>(
    progress: &mut ProgressStore,
    problem: &'p Problem,
) -> Option<(usize, &'p str)> {
    let revealed = progress.hint_usage(&problem.id);
    let hint = problem.hints.get(revealed)?;
    if !progress.set_hint_usage(&problem.id, revealed + 1) {
        log::warn!("Hint usage for '{}' could not be saved", problem.id);
    }
    Some((revealed + 1, hint.as_str()))
}

/// Returns whether progress was actually reset.
pub fn reset_progress(progress: &mut ProgressStore, assume_yes: bool) -> Result<bool> {
    if !assume_yes {
        let yes = interactive::confirm("Reset all progress? This cannot be undone")
            .context("Failed to read confirmation")?;
        if !yes {
            return Ok(false);
        }
    }
    ensure!(
        progress.reset(),
        "Failed to save reset progress to {:?}",
        progress.save_path()
    );
    Ok(true)
}
