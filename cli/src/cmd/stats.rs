use pycoach_core::{action, stats::Stats, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let catalog = action::load_catalog(&cfg)?;
    let progress = action::open_progress(&cfg);

    let stats = Stats::summarize(catalog.all(), progress.completed_problems());
    if global_args.json {
        util::print_json(&stats)
    } else {
        style::print_stats(&stats);
        Ok(())
    }
}
