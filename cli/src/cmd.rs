pub mod check;
pub mod hint;
pub mod init;
pub mod problems;
pub mod progress;
pub mod run;
pub mod show;
pub mod stats;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Use this config file instead of searching for pycoach.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Execution time limit in seconds
    #[arg(long, global = true)]
    pub timeout: Option<f64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),

    #[command(alias("r"))]
    Run(run::Args),

    #[command(alias("c"))]
    Check(check::Args),

    #[command(alias("ls"))]
    Problems(problems::Args),

    Show(show::Args),
    Hint(hint::Args),
    Progress(progress::Args),
    Stats(stats::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Run(args) => run::exec(args, self).await,
            Check(args) => check::exec(args, self).await,
            Problems(args) => problems::exec(args, self),
            Show(args) => show::exec(args, self),
            Hint(args) => hint::exec(args, self),
            Progress(args) => progress::exec(args, self),
            Stats(args) => stats::exec(args, self),
        }
    }
}

#[cfg(test)]
mod test {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn verify_cli() {
        GlobalArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_may_follow_the_subcommand() {
        let app = GlobalArgs::parse_from(["pycoach", "run", "a.py", "--timeout", "1.5", "--json"]);
        assert_eq!(app.timeout, Some(1.5));
        assert!(app.json);
        assert!(matches!(app.subcmd, Subcommand::Run(_)));
    }

    #[test]
    fn show_reveals_solution_only_on_request() {
        let app = GlobalArgs::parse_from(["pycoach", "show", "syntax_001"]);
        assert!(matches!(app.subcmd, Subcommand::Show(ref args) if !args.solution));

        let app = GlobalArgs::parse_from(["pycoach", "show", "syntax_001", "--solution"]);
        assert!(matches!(app.subcmd, Subcommand::Show(ref args) if args.solution));
    }

    #[test]
    fn run_input_flags_conflict() {
        let res = GlobalArgs::try_parse_from([
            "pycoach",
            "run",
            "a.py",
            "--input",
            "x",
            "--input-file",
            "in.txt",
        ]);
        assert!(res.is_err());
    }
}
