use std::path::{Component, Path, PathBuf};

use crate::cli::Cli;
use crate::compile_db::FILTERED_DATABASE_NAME;
use crate::error::RunnerError;

/// Which database cppcheck is pointed at with `--project=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectMode {
    /// The database given on the command line, narrowed with `--file-filter`.
    Original,
    /// A one-entry copy written to the given path before the run.
    Filtered(PathBuf),
    /// No `--project`; the file and its compile flags are passed directly.
    None,
}

#[derive(Debug)]
pub struct Config {
    pub no_color: bool,
    pub verbose: bool,
    pub cppcheck: String,
    pub compile_commands: PathBuf,
    pub build_dir: PathBuf,
    /// The source file exactly as given; matched against the database.
    pub target: PathBuf,
    /// `target` made absolute with `.` and `..` resolved.
    pub file: PathBuf,
    pub project_mode: ProjectMode,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, RunnerError> {
        if cli.cppcheck.trim().is_empty() {
            return Err(RunnerError::Config(
                "cppcheck executable must not be empty".to_string(),
            ));
        }

        let compile_commands = Self::resolve_path(&cli.compile_commands)?;
        let build_dir = Self::resolve_path(&cli.build_dir)?;
        let file = Self::resolve_path(&cli.file)?;

        let project_mode = if cli.no_project {
            ProjectMode::None
        } else if let Some(path) = cli.filtered_output {
            ProjectMode::Filtered(Self::resolve_path(&path)?)
        } else if cli.filtered {
            let dir = compile_commands.parent().unwrap_or(Path::new("/"));
            ProjectMode::Filtered(dir.join(FILTERED_DATABASE_NAME))
        } else {
            ProjectMode::Original
        };

        Ok(Self {
            no_color: cli.no_color,
            verbose: cli.verbose,
            cppcheck: cli.cppcheck,
            compile_commands,
            build_dir,
            target: cli.file,
            file,
            project_mode,
        })
    }

    /// Resolves a path to an absolute path.
    /// - Relative paths are resolved relative to current directory
    /// - `.` is dropped and `..` removes the previous component, without
    ///   touching the filesystem; `..` at the root stays at the root
    pub fn resolve_path(path: &Path) -> Result<PathBuf, RunnerError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let current_dir = std::env::current_dir().map_err(|e| {
                RunnerError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            current_dir.join(path)
        };

        let mut resolved = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        Ok(resolved)
    }
}
