use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};
use thiserror::Error;
use which::which;

use super::invocation::Invocation;

/// Captured output of a successful cppcheck run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes cppcheck as a child process.
pub struct CppcheckRunner {
    executable: PathBuf,
}

impl CppcheckRunner {
    /// Creates a new runner, verifying the executable can be found.
    ///
    /// `executable` is either a bare name looked up in `PATH` or a path.
    pub fn new(executable: &str) -> Result<Self, CppcheckError> {
        let resolved =
            which(executable).map_err(|_| CppcheckError::NotFound(executable.to_string()))?;

        debug!("Found cppcheck at: {:?}", resolved);

        Ok(Self {
            executable: resolved,
        })
    }

    /// Runs cppcheck and waits for it to exit.
    ///
    /// There is no timeout; a hanging cppcheck blocks the caller.
    pub fn run(&self, invocation: &Invocation) -> Result<ToolOutput, CppcheckError> {
        info!("Running cppcheck with command: {}", invocation.command_line());

        let output = Command::new(&self.executable)
            .args(invocation.args())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CppcheckError::NotFound(invocation.program().to_string()),
                _ => CppcheckError::CommandFailed(format!("Failed to execute cppcheck: {}", e)),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            debug!(
                "cppcheck finished ({} bytes stdout, {} bytes stderr)",
                stdout.len(),
                stderr.len()
            );
            Ok(ToolOutput { stdout, stderr })
        } else {
            let message = if !stderr.is_empty() { stderr } else { stdout };
            Err(CppcheckError::Failed {
                status: output.status.to_string(),
                message,
            })
        }
    }
}

#[derive(Debug, Error)]
pub enum CppcheckError {
    #[error("{0} is not installed or not found in PATH. Please install cppcheck: https://cppcheck.sourceforge.io")]
    NotFound(String),

    #[error("cppcheck failed with error ({status}):\n{message}")]
    Failed { status: String, message: String },

    #[error("Failed to run cppcheck: {0}")]
    CommandFailed(String),
}
