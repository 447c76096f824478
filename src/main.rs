mod cli;

use std::process::ExitCode;

use clap::Parser;

use word_completer::logging::init_logger;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = match init_logger(args.no_color, args.log_level.as_deref(), args.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
