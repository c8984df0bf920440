use std::path::PathBuf;

use thiserror::Error;

use crate::compile_db::CompileDbError;
use crate::cppcheck::CppcheckError;
use crate::project_config::ProjectConfigError;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    CompileDb(#[from] CompileDbError),

    #[error("No compile command found for file: {0}")]
    NoCompileCommand(PathBuf),

    #[error(
        "No .cppcheck-config file found for {0}. Create one next to the sources, the same way you would place a .clang-tidy or .clang-format file"
    )]
    ConfigNotFound(PathBuf),

    #[error("{0}")]
    ProjectConfig(#[from] ProjectConfigError),

    #[error("{0}")]
    Cppcheck(#[from] CppcheckError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
