use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use cppcheck_runner::{
    cli::Cli, config::Config, cppcheck::Summary, logging::init_logging, pipeline::run_check,
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                // Usage errors exit with 1 rather than clap's default of 2.
                let _ = err.print();
                std::process::exit(1);
            }
        },
    };

    init_logging(cli.verbose, cli.no_color);

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let diagnostics = run_check(&config)?;

    let summary = Summary::from_diagnostics(&diagnostics);
    log::info!("{}", summary.render());

    Ok(())
}
