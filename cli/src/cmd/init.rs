use pycoach_core::{action, print_success};
use std::path::PathBuf;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let filepath = action::init_config(&args.dir)?;
    print_success!(
        "Wrote an example config. (path: {})",
        filepath.to_string_lossy()
    );
    Ok(())
}
