use std::process;

use clap::Parser;
use log::LevelFilter;
use phantom::styling::eprintln;

mod cli;
mod commands;

use cli::Cli;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match commands::run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Error messages are already formatted with emoji and colors
            eprintln!("{}", e.styled());
            e.exit_code()
        }
    };
    process::exit(code);
}
