use colored::Colorize as _;
use pycoach_core::action;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    pub problem_id: String,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let catalog = action::load_catalog(&cfg)?;
    let problem = action::find_problem(&catalog, &args.problem_id)?;
    let mut progress = action::open_progress(&cfg);

    let revealed = action::reveal_next_hint(&mut progress, problem);

    if global_args.json {
        let (number, hint) = revealed.unzip();
        return util::print_json(&serde_json::json!({
            "problem_id": problem.id,
            "hint_number": number,
            "total_hints": problem.hints.len(),
            "hint": hint,
        }));
    }

    match revealed {
        Some((number, hint)) => println!(
            "{} {}",
            format!("Hint {}/{}:", number, problem.hints.len()).cyan().bold(),
            hint
        ),
        None if problem.hints.is_empty() => println!("'{}' has no hints.", problem.id),
        None => println!("All hints for '{}' are already revealed.", problem.id),
    }
    Ok(())
}
