use std::path::PathBuf;

use pycoach_core::{action, checker::Checker, print_success, sandbox::Sandbox, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    pub problem_id: String,

    pub program_file: PathBuf,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let timeout = util::timeout(global_args, &cfg)?;
    let catalog = action::load_catalog(&cfg)?;
    let problem = action::find_problem(&catalog, &args.problem_id)?;
    let code = action::read_program_file(&args.program_file)?;

    let mut progress = action::open_progress(&cfg);
    let checker = Checker::new(Sandbox::from_config(&cfg.sandbox));
    let outcome = action::check_and_record(
        &checker,
        &mut progress,
        problem,
        &code,
        timeout,
        !global_args.json,
    )
    .await;

    if global_args.json {
        util::print_json(&outcome)?;
    } else {
        style::print_check_result(problem, outcome.judge, &outcome.result);
        if outcome.newly_completed {
            print_success!("Solved '{}' for the first time ✨", problem.id);
        }
    }

    if !outcome.result.is_correct {
        std::process::exit(1);
    }
    Ok(())
}
