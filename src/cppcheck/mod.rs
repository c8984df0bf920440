mod invocation;
mod report;
mod runner;

pub use invocation::{Invocation, ProjectArgs};
pub use report::{Diagnostic, Level, Severity, Summary, TEMPLATE, parse_report};
pub use runner::{CppcheckError, CppcheckRunner, ToolOutput};
