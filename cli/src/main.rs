use std::io::Write as _;

use clap::Parser;
use colored::Colorize as _;
use pycoach_cli::cmd::GlobalArgs;
use pycoach_core::style::ColorTheme as _;

const LOG_ENV: &str = "PYCOACH_LOG";

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "[{}] {}",
                level.to_string().color(level.color()).bold(),
                record.args()
            )
        })
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();
    let app = GlobalArgs::parse();
    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
