use std::path::PathBuf;

use anyhow::Context as _;
use pycoach_core::{action, sandbox::Sandbox, style};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub program_file: PathBuf,

    /// Lines answered to `input()` calls, separated by newlines
    #[arg(long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the simulated input from a file
    #[arg(long)]
    pub input_file: Option<PathBuf>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = util::load_config(global_args)?;
    let timeout = util::timeout(global_args, &cfg)?;
    let code = action::read_program_file(&args.program_file)?;

    let input = match (&args.input, &args.input_file) {
        (Some(input), _) => Some(input.clone()),
        (None, Some(path)) => Some(
            fsutil::read_to_string(path)
                .with_context(|| format!("Cannot read input file {:?}", path))?,
        ),
        (None, None) => None,
    };

    let sandbox = Sandbox::from_config(&cfg.sandbox);
    let res = action::run_code(
        &sandbox,
        &code,
        input.as_deref(),
        timeout,
        !global_args.json,
    )
    .await;

    if global_args.json {
        util::print_json(&res)?;
    } else {
        style::print_execution_result(&res);
    }

    if !res.success {
        std::process::exit(1);
    }
    Ok(())
}
