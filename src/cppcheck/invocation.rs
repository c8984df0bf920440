use std::path::{Path, PathBuf};

use super::report::TEMPLATE;

/// How cppcheck learns about the translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectArgs {
    /// `--project=<database>` narrowed to one file with `--file-filter`.
    Project {
        database: PathBuf,
        file_filter: String,
    },
    /// The file itself plus the preprocessor flags of its compile command.
    Direct { file: String, flags: Vec<String> },
}

/// The full argument list of one cppcheck run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Assembles the arguments.
    ///
    /// The fixed flags come first and the `.cppcheck-config` parameters after
    /// them, so a config file can override anything set here.
    pub fn new(
        program: &str,
        build_dir: &Path,
        project: ProjectArgs,
        config_params: Vec<String>,
    ) -> Self {
        let mut args = Vec::with_capacity(config_params.len() + 5);

        let build_dir_arg = format!("--cppcheck-build-dir={}", build_dir.display());
        let template_arg = format!("--template={}", TEMPLATE);

        match project {
            ProjectArgs::Project {
                database,
                file_filter,
            } => {
                args.push(format!("--project={}", database.display()));
                args.push(build_dir_arg);
                args.push(template_arg);
                args.push(format!("--file-filter={}", file_filter));
                args.extend(config_params);
            }
            ProjectArgs::Direct { file, flags } => {
                args.push(build_dir_arg);
                args.push(template_arg);
                args.push(file);
                args.extend(config_params);
                args.extend(flags);
            }
        }

        Self {
            program: program.to_string(),
            args,
        }
    }

    /// The executable as given by the user.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program and arguments joined with spaces, for logging.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
