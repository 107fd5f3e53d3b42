use colored::Colorize as _;
use pycoach_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub action: Option<ProgressAction>,
}

#[derive(Debug, clap::Subcommand)]
pub enum ProgressAction {
    /// Forget every completed problem and revealed hint
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let mut progress = action::open_progress(&cfg);

    match &args.action {
        Some(ProgressAction::Reset { yes }) => {
            if action::reset_progress(&mut progress, *yes)? {
                print_success!(
                    "Progress has been reset. (path: {:?})",
                    util::replace_homedir_to_tilde(progress.save_path())
                );
            } else {
                println!("Cancelled.");
            }
            Ok(())
        }
        None => {
            let stats = progress.stats();
            if global_args.json {
                return util::print_json(&stats);
            }
            println!(
                "{} problem(s) completed {}",
                stats.total_completed.to_string().bold(),
                format!(
                    "({:?})",
                    util::replace_homedir_to_tilde(progress.save_path())
                )
                .dimmed()
            );
            for id in &stats.completed_ids {
                println!("  {} {}", "✔".green(), id);
            }
            Ok(())
        }
    }
}
