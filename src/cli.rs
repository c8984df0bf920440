use std::path::PathBuf;

use clap::Parser;

/// Run cppcheck on a single translation unit.
///
/// Looks up FILE in the compile_commands.json database, collects extra
/// parameters from the nearest .cppcheck-config found by walking up from the
/// file's directory, and runs cppcheck with a machine-readable output template.
#[derive(Parser, Debug)]
#[command(name = "cppcheck-runner")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// cppcheck executable name or path
    pub cppcheck: String,

    /// Path to the compile_commands.json database
    pub compile_commands: PathBuf,

    /// cppcheck build directory (created if missing)
    pub build_dir: PathBuf,

    /// Source file to analyze
    pub file: PathBuf,

    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Write a one-entry copy of the database next to it and analyze that
    #[arg(long = "filtered", conflicts_with = "no_project")]
    pub filtered: bool,

    /// Write the one-entry database copy to this path and analyze that
    #[arg(
        long = "filtered-output",
        value_name = "PATH",
        conflicts_with = "no_project"
    )]
    pub filtered_output: Option<PathBuf>,

    /// Do not pass the database to cppcheck; pass the file with its -D/-I flags instead
    #[arg(long = "no-project")]
    pub no_project: bool,
}
