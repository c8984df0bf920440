//! Reading, querying and writing `compile_commands.json` databases.
//!
//! Entries are matched by their `file` field using a lexical, case-insensitive
//! and separator-agnostic comparison. Everything besides `file` is carried
//! through untouched so a filtered copy keeps every compiler-invocation key.

pub mod flags;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use thiserror::Error;

/// File name used for the filtered copy when no explicit path is given.
pub const FILTERED_DATABASE_NAME: &str = "compile_commands_cppcheck.json";

#[derive(Debug, Error)]
pub enum CompileDbError {
    #[error("Failed to read compile database {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Invalid compile database {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to write compile database {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// A single entry of a compile command database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// Source file of the translation unit, as written in the database.
    pub file: String,

    /// `directory`, `command`, `arguments`, `output` and anything else.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CompileCommand {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            fields: Map::new(),
        }
    }

    /// The `file` field with backslashes turned into forward slashes.
    ///
    /// Case is preserved, which matters to cppcheck's `--file-filter`.
    pub fn forward_slash_file(&self) -> String {
        self.file.replace('\\', "/")
    }

    /// The compiler invocation as one string.
    ///
    /// Uses `command` when present, otherwise joins `arguments` with spaces.
    pub fn command_line(&self) -> Option<String> {
        if let Some(Value::String(command)) = self.fields.get("command") {
            return Some(command.clone());
        }

        match self.fields.get("arguments") {
            Some(Value::Array(arguments)) => {
                let parts: Vec<&str> = arguments.iter().filter_map(Value::as_str).collect();
                Some(parts.join(" "))
            }
            _ => None,
        }
    }

    fn matches(&self, normalized_target: &str) -> bool {
        normalize_path(&self.file) == normalized_target
    }
}

/// Normalizes a path for comparison.
///
/// Backslashes become slashes, empty and `.` segments are dropped, `..` is
/// resolved lexically and the result is lowercased. `..` never climbs above
/// the root of an absolute path or a drive prefix such as `c:`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if is_drive(last) => {}
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                None if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    let normalized = match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    };

    normalized.to_lowercase()
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Loads every entry of the database at `path`.
pub fn load_compile_commands(path: &Path) -> Result<Vec<CompileCommand>, CompileDbError> {
    let content =
        fs::read_to_string(path).map_err(|e| CompileDbError::Read(path.to_path_buf(), e))?;

    serde_json::from_str(&content).map_err(|e| CompileDbError::Parse(path.to_path_buf(), e))
}

/// Returns the first entry of `entries` whose file is `target`.
pub fn select_compile_command<'a>(
    entries: &'a [CompileCommand],
    target: &str,
) -> Option<&'a CompileCommand> {
    let normalized_target = normalize_path(target);
    entries.iter().find(|entry| entry.matches(&normalized_target))
}

/// Looks up `target` in the database at `db_path`.
///
/// The result holds the first matching entry, or nothing when the file is not
/// part of the database. It has the shape of a database so it can be written
/// straight back with [`save_compile_commands`].
pub fn find_compile_command(
    db_path: &Path,
    target: &Path,
) -> Result<Vec<CompileCommand>, CompileDbError> {
    let entries = load_compile_commands(db_path)?;
    let target = target.to_string_lossy();

    let found: Vec<CompileCommand> = select_compile_command(&entries, &target)
        .into_iter()
        .cloned()
        .collect();

    log::debug!(
        "Searched {} compile commands in {}: {}",
        entries.len(),
        db_path.display(),
        if found.is_empty() { "no match" } else { "match" }
    );

    Ok(found)
}

/// Writes `entries` as a pretty-printed database, replacing `output_path`.
pub fn save_compile_commands(
    output_path: &Path,
    entries: &[CompileCommand],
) -> Result<(), CompileDbError> {
    let write_error = |e: std::io::Error| CompileDbError::Write(output_path.to_path_buf(), e);

    let file = fs::File::create(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(|e| CompileDbError::Write(output_path.to_path_buf(), e.into()))?;

    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    Ok(())
}
