//! The end-to-end check of one source file.
//!
//! lookup → (filtered database) → `.cppcheck-config` → cppcheck → report

use std::fs;

use log::{debug, info};

use crate::compile_db::flags::CompileFlags;
use crate::compile_db::{find_compile_command, save_compile_commands};
use crate::config::{Config, ProjectMode};
use crate::cppcheck::{CppcheckRunner, Diagnostic, Invocation, ProjectArgs, parse_report};
use crate::error::{Result, RunnerError};
use crate::project_config::{find_cppcheck_config, read_cppcheck_config};

/// Runs cppcheck for `config.target` and returns the parsed findings.
///
/// The database is searched with the path as given; the config search, the
/// direct file argument and the build directory use the absolute path.
///
/// cppcheck's own output is forwarded to stdout and stderr as it was captured.
pub fn run_check(config: &Config) -> Result<Vec<Diagnostic>> {
    if let Ok(cwd) = std::env::current_dir() {
        debug!("Current working directory: {}", cwd.display());
    }

    let found = find_compile_command(&config.compile_commands, &config.target)?;
    let Some(entry) = found.first() else {
        return Err(RunnerError::NoCompileCommand(config.target.clone()));
    };
    debug!("Compile command entry: {:?}", entry);

    let project = match &config.project_mode {
        ProjectMode::Original => ProjectArgs::Project {
            database: config.compile_commands.clone(),
            file_filter: entry.forward_slash_file(),
        },
        ProjectMode::Filtered(output_path) => {
            save_compile_commands(output_path, &found)?;
            info!("Filtered compile command saved to: {}", output_path.display());
            ProjectArgs::Project {
                database: output_path.clone(),
                file_filter: entry.forward_slash_file(),
            }
        }
        ProjectMode::None => ProjectArgs::Direct {
            file: config.file.to_string_lossy().replace('\\', "/"),
            flags: CompileFlags::from_compile_command(entry).into_args(),
        },
    };

    let config_path = find_cppcheck_config(&config.file)
        .ok_or_else(|| RunnerError::ConfigNotFound(config.file.clone()))?;
    info!("Found .cppcheck-config: {}", config_path.display());

    let params = read_cppcheck_config(&config_path)?;
    debug!("{} parameters from {}", params.len(), config_path.display());

    let runner = CppcheckRunner::new(&config.cppcheck)?;

    fs::create_dir_all(&config.build_dir)?;

    let invocation = Invocation::new(&config.cppcheck, &config.build_dir, project, params);
    let output = runner.run(&invocation)?;

    print!("{}", output.stdout);
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }

    let mut diagnostics = parse_report(&output.stderr);
    diagnostics.extend(parse_report(&output.stdout));

    for diagnostic in &diagnostics {
        debug!("{}", diagnostic);
    }

    Ok(diagnostics)
}
