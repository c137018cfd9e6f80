//! dka - finite state machine validation, epsilon rule removal and
//! determinization.

use clap::Parser;
use clap::error::ErrorKind;
use dka::cli::{self, Cli};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(cli::USAGE_EXIT_CODE);
        }
    };

    if let Err(e) = cli::run(&cli) {
        eprintln!("ERR: {e}");
        process::exit(e.exit_code());
    }
}
