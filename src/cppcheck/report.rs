//! Structured view of cppcheck's templated output.
//!
//! cppcheck is run with [`TEMPLATE`], which writes every finding as a block of
//! `key:value` lines between `START_ERROR` and `STOP_ERROR` markers.

use std::fmt;

use colored::Colorize;

const START_MARKER: &str = "START_ERROR";
const STOP_MARKER: &str = "STOP_ERROR";

/// Value of cppcheck's `--template=` option.
///
/// The `\n` sequences are literal; cppcheck expands them itself. `{code}` may
/// span several lines and therefore comes last.
pub const TEMPLATE: &str = r"START_ERROR\nfile:{file}\nline:{line}\ncolumn:{column}\ncallstack:{callstack}\ninconclusive:{inconclusive:true}\nseverity:{severity}\nmessage:{message}\nid:{id}\ncwe:{cwe}\ncode:{code}\nSTOP_ERROR";

/// cppcheck's severity names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Style,
    Performance,
    Portability,
    Information,
    Debug,
    #[default]
    None,
}

impl Severity {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "style" => Severity::Style,
            "performance" => Severity::Performance,
            "portability" => Severity::Portability,
            "information" => Severity::Information,
            "debug" => Severity::Debug,
            _ => Severity::None,
        }
    }

    /// Collapses the severity onto error / warning / info.
    pub fn level(self) -> Level {
        match self {
            Severity::Error => Level::Error,
            Severity::Warning | Severity::Performance | Severity::Portability => Level::Warning,
            _ => Level::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Style => "style",
            Severity::Performance => "performance",
            Severity::Portability => "portability",
            Severity::Information => "information",
            Severity::Debug => "debug",
            Severity::None => "none",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// One finding reported by cppcheck.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    /// 1-based; 0 when cppcheck reported no position.
    pub line: u32,
    pub column: u32,
    pub callstack: String,
    pub inconclusive: bool,
    pub severity: Severity,
    pub message: String,
    pub id: String,
    pub cwe: String,
    /// Source line and caret marker, possibly several lines.
    pub code: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} [{}]",
            self.file, self.line, self.column, self.severity, self.message, self.id
        )?;
        if self.inconclusive {
            write!(f, " (inconclusive)")?;
        }
        Ok(())
    }
}

/// Parses every complete `START_ERROR`/`STOP_ERROR` block in `output`.
///
/// Text outside blocks and a trailing unterminated block are ignored.
pub fn parse_report(output: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut current: Option<Diagnostic> = None;
    let mut in_code = false;

    for line in output.lines() {
        match line.trim_end() {
            START_MARKER => {
                current = Some(Diagnostic::default());
                in_code = false;
                continue;
            }
            STOP_MARKER => {
                diagnostics.extend(current.take());
                in_code = false;
                continue;
            }
            _ => {}
        }

        let Some(diagnostic) = current.as_mut() else {
            continue;
        };

        if in_code {
            diagnostic.code.push('\n');
            diagnostic.code.push_str(line);
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        match key {
            "file" => diagnostic.file = value.to_string(),
            "line" => diagnostic.line = value.trim().parse().unwrap_or(0),
            "column" => diagnostic.column = value.trim().parse().unwrap_or(0),
            "callstack" => diagnostic.callstack = value.to_string(),
            "inconclusive" => diagnostic.inconclusive = value.trim() == "true",
            "severity" => diagnostic.severity = Severity::parse(value),
            "message" => diagnostic.message = value.to_string(),
            "id" => diagnostic.id = value.to_string(),
            "cwe" => diagnostic.cwe = value.to_string(),
            "code" => {
                diagnostic.code = value.to_string();
                in_code = true;
            }
            _ => log::debug!("Ignoring unknown report field: {}", key),
        }
    }

    diagnostics
}

/// Number of findings per level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Summary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Summary::default(), |mut summary, diagnostic| {
                match diagnostic.severity.level() {
                    Level::Error => summary.errors += 1,
                    Level::Warning => summary.warnings += 1,
                    Level::Info => summary.infos += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }

    /// One-line summary, colored unless colors are disabled globally.
    pub fn render(&self) -> String {
        if self.total() == 0 {
            return "cppcheck reported no findings".to_string();
        }

        let errors = format!("{} errors", self.errors);
        let warnings = format!("{} warnings", self.warnings);
        let infos = format!("{} infos", self.infos);

        format!(
            "cppcheck reported {}, {}, {}",
            if self.errors > 0 { errors.red().bold() } else { errors.normal() },
            if self.warnings > 0 { warnings.yellow() } else { warnings.normal() },
            infos.normal()
        )
    }
}
