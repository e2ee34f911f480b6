//! cinedex CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use cinedex::cli::args::*;
use cinedex::cli::commands::*;
use cinedex::error::ErrorKind;

fn main() {
    // Parse command line arguments using clap
    let args = CinedexArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Missing or invalid settings stop the program before any work is done.
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    if let Err(e) = execute_command(args, config) {
        eprintln!("Error: {e}");
        let code = if e.kind() == ErrorKind::Config { 2 } else { 1 };
        process::exit(code);
    }
}
