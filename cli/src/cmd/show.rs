use pycoach_core::{action, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    pub problem_id: String,

    /// Also reveal the reference solution
    #[arg(long)]
    pub solution: bool,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let catalog = action::load_catalog(&cfg)?;
    let problem = action::find_problem(&catalog, &args.problem_id)?;

    if global_args.json {
        return if args.solution {
            util::print_json(problem)
        } else {
            util::print_json(&problem.without_solution())
        };
    }

    let progress = action::open_progress(&cfg);
    style::print_problem(
        problem,
        progress.hint_usage(&problem.id),
        progress.is_completed(&problem.id),
    );
    if args.solution {
        style::print_solution(problem);
    }
    Ok(())
}
