use clap::Parser;
use icon_mirror_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(e) = logging::init_file_logging() {
            eprintln!("icon-mirror: could not open log file ({e:#}), logging to stderr");
            logging::init_logging_stderr();
        }
    } else {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run() {
        eprintln!("icon-mirror error: {:#}", err);
        std::process::exit(1);
    }
}
