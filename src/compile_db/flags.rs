//! Preprocessor flags pulled out of a compiler command line.
//!
//! Only used when cppcheck is run without `--project`, in which case the
//! defines and include paths have to be passed explicitly.

use regex::Regex;

use super::CompileCommand;

/// Flags cppcheck understands that were found in a compile command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompileFlags {
    /// `-DNAME` / `-DNAME=VALUE`, MSVC `/D` spellings rewritten to `-D`.
    pub defines: Vec<String>,
    /// `-Ipath` entries.
    pub include_paths: Vec<String>,
}

impl CompileFlags {
    /// Extracts flags from the entry's `command` or `arguments`.
    pub fn from_compile_command(entry: &CompileCommand) -> Self {
        entry
            .command_line()
            .map(|line| Self::parse(&line))
            .unwrap_or_default()
    }

    /// Extracts flags from a single command line, keeping their order.
    ///
    /// Flags must start a token, so `/D` inside a path is not a define.
    pub fn parse(command_line: &str) -> Self {
        let define = Regex::new(r"(?:^|\s)[-/]D(\S+)").expect("valid regex");
        let include = Regex::new(r"(?:^|\s)-I(\S+)").expect("valid regex");

        let defines = define
            .captures_iter(command_line)
            .map(|caps| format!("-D{}", &caps[1]))
            .collect();

        let include_paths = include
            .captures_iter(command_line)
            .map(|caps| format!("-I{}", &caps[1]))
            .collect();

        Self {
            defines,
            include_paths,
        }
    }

    /// Defines first, then include paths.
    pub fn into_args(self) -> Vec<String> {
        let mut args = self.defines;
        args.extend(self.include_paths);
        args
    }
}
