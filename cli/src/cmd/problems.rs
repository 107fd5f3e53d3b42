use pycoach_core::{action, catalog, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only problems of this category ("All" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Beginner, Intermediate, Advanced or All
    #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(catalog::difficulties().iter().copied()))]
    pub difficulty: Option<String>,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let catalog = action::load_catalog(&cfg)?;
    let problems = catalog.filter(args.category.as_deref(), args.difficulty.as_deref());

    if global_args.json {
        let listed: Vec<_> = problems.iter().map(|p| p.without_solution()).collect();
        return util::print_json(&listed);
    }

    if problems.is_empty() {
        println!("No problems match.");
        return Ok(());
    }
    let progress = action::open_progress(&cfg);
    style::print_problem_list(problems, |id| progress.is_completed(id));
    Ok(())
}
