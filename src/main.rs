// src/main.rs

use clap::CommandFactory;
use xvfb_maybe::cli::{self, CliArgs};
use xvfb_maybe::errors::XvfbMaybeError;
use xvfb_maybe::{FAILURE_EXIT_CODE, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if args.argv.is_empty() {
        let _ = CliArgs::command().print_help();
        std::process::exit(FAILURE_EXIT_CODE);
    }

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("xvfb-maybe: {err}");
    }

    match run(args).await {
        Ok(output) => {
            if !output.is_empty() {
                print!("{output}");
            }
        }
        Err(err) => {
            if matches!(err, XvfbMaybeError::UsageError(_)) {
                let _ = CliArgs::command().print_help();
            }
            eprintln!("{err}");
            std::process::exit(FAILURE_EXIT_CODE);
        }
    }
}
