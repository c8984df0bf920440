//! Integration tests for the cppcheck-runner CLI.
//!
//! cppcheck itself is replaced by a small shell script on Unix so the tests
//! do not depend on a local installation. They assume no `.cppcheck-config`
//! exists above the system temp directory.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A project with `src/main.cpp` listed in `build/compile_commands.json`.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("src/main.cpp"), "int main() { return 0; }\n").unwrap();

        let db = serde_json::json!([
            {
                "directory": dir.path().join("build"),
                "command": "g++ -DDEBUG -I../include -c ../src/main.cpp",
                "file": dir.path().join("src/main.cpp"),
            },
            {
                "directory": dir.path().join("build"),
                "command": "g++ -c ../src/other.cpp",
                "file": dir.path().join("src/other.cpp"),
            }
        ]);
        fs::write(dir.path().join("build/compile_commands.json"), db.to_string()).unwrap();

        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn with_config(self, content: &str) -> Self {
        fs::write(self.path(".cppcheck-config"), content).unwrap();
        self
    }

    fn command(&self, cppcheck: &str, file: &Path) -> Command {
        let mut cmd = Command::cargo_bin("cppcheck-runner").unwrap();
        cmd.arg("--no-color")
            .arg(cppcheck)
            .arg(self.path("build/compile_commands.json"))
            .arg(self.path("cppcheck-build"))
            .arg(file);
        cmd
    }

    #[cfg(unix)]
    fn fake_cppcheck(&self, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path("fake-cppcheck");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_lists_options() {
    Command::cargo_bin("cppcheck-runner")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--filtered"))
        .stdout(predicate::str::contains("--filtered-output"))
        .stdout(predicate::str::contains("--no-project"));
}

#[test]
fn test_version() {
    Command::cargo_bin("cppcheck-runner")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_prints_usage_and_exits_1() {
    Command::cargo_bin("cppcheck-runner")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_too_few_arguments_exits_1() {
    Command::cargo_bin("cppcheck-runner")
        .unwrap()
        .args(["cppcheck", "compile_commands.json", "build"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_too_many_arguments_exits_1() {
    Command::cargo_bin("cppcheck-runner")
        .unwrap()
        .args(["cppcheck", "compile_commands.json", "build", "a.cpp", "extra"])
        .assert()
        .code(1);
}

#[test]
fn test_filtered_conflicts_with_no_project() {
    let project = Project::new();
    project
        .command("cppcheck", &project.path("src/main.cpp"))
        .args(["--filtered", "--no-project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_file_missing_from_database() {
    let project = Project::new().with_config("--enable=all\n");
    let target = project.path("src/unknown.cpp");

    project
        .command("cppcheck", &target)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "No compile command found for file: {}",
            target.display()
        )));
}

#[test]
fn test_missing_database_fails() {
    let project = Project::new();
    fs::remove_file(project.path("build/compile_commands.json")).unwrap();

    project
        .command("cppcheck", &project.path("src/main.cpp"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read compile database"));
}

#[test]
fn test_missing_config_fails() {
    let project = Project::new();

    project
        .command("cppcheck", &project.path("src/main.cpp"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No .cppcheck-config file found"));

    assert!(!project.path("cppcheck-build").exists());
}

#[test]
fn test_missing_tool_fails() {
    let project = Project::new().with_config("--enable=all\n");

    project
        .command(
            "definitely-not-a-real-cppcheck-binary",
            &project.path("src/main.cpp"),
        )
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed or not found in PATH"));
}

#[cfg(unix)]
#[test]
fn test_tool_failure_reports_stderr() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck("echo 'cppcheck: unknown option' >&2; exit 1");

    project
        .command(&cppcheck, &project.path("src/main.cpp"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cppcheck failed with error"))
        .stderr(predicate::str::contains("cppcheck: unknown option"));
}

// ============================================================================
// Successful runs (Unix only, fake cppcheck echoes its arguments)
// ============================================================================

#[cfg(unix)]
const ECHO_ARGS: &str = r#"for a in "$@"; do printf 'arg:%s\n' "$a"; done"#;

#[cfg(unix)]
#[test]
fn test_runs_cppcheck_with_project_and_config_params() {
    let project = Project::new().with_config("--enable=all\n# comment\n\n--inline-suppr\n");
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);
    let db = project.path("build/compile_commands.json");
    let file = project.path("src/main.cpp");

    project
        .command(&cppcheck, &file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("arg:--project={}", db.display())))
        .stdout(predicate::str::contains(format!(
            "arg:--cppcheck-build-dir={}",
            project.path("cppcheck-build").display()
        )))
        .stdout(predicate::str::contains("arg:--template=START_ERROR"))
        .stdout(predicate::str::contains(format!(
            "arg:--file-filter={}",
            file.display()
        )))
        .stdout(predicate::str::contains("arg:--enable=all\narg:--inline-suppr\n"))
        .stdout(predicate::str::contains("comment").not());

    assert!(project.path("cppcheck-build").is_dir());
}

#[cfg(unix)]
#[test]
fn test_lookup_ignores_case() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);
    let file = project.path("src/MAIN.CPP");

    // The filter keeps the spelling from the database.
    project
        .command(&cppcheck, &file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "arg:--file-filter={}",
            project.path("src/main.cpp").display()
        )));
}

#[cfg(unix)]
#[test]
fn test_nearest_config_wins() {
    let project = Project::new().with_config("--enable=all\n");
    fs::write(project.path("src/.cppcheck-config"), "--enable=style\n").unwrap();
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);

    project
        .command(&cppcheck, &project.path("src/main.cpp"))
        .assert()
        .success()
        .stdout(predicate::str::contains("arg:--enable=style"))
        .stdout(predicate::str::contains("arg:--enable=all").not());
}

#[cfg(unix)]
#[test]
fn test_filtered_writes_single_entry_database() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);
    let filtered = project.path("build/compile_commands_cppcheck.json");

    project
        .command(&cppcheck, &project.path("src/main.cpp"))
        .arg("--filtered")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "arg:--project={}",
            filtered.display()
        )));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&filtered).unwrap()).unwrap();
    let entries = written.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0]["command"],
        "g++ -DDEBUG -I../include -c ../src/main.cpp"
    );
}

#[cfg(unix)]
#[test]
fn test_filtered_output_path() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);
    let filtered = project.path("single.json");

    project
        .command(&cppcheck, &project.path("src/main.cpp"))
        .arg("--filtered-output")
        .arg(&filtered)
        .assert()
        .success();

    assert!(filtered.is_file());
    assert!(!project.path("build/compile_commands_cppcheck.json").exists());
}

#[cfg(unix)]
#[test]
fn test_no_project_passes_compile_flags() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);
    let file = project.path("src/main.cpp");

    project
        .command(&cppcheck, &file)
        .arg("--no-project")
        .assert()
        .success()
        .stdout(predicate::str::contains("arg:--project=").not())
        .stdout(predicate::str::contains("arg:--file-filter=").not())
        .stdout(predicate::str::contains(format!(
            "arg:{}\narg:--enable=all\narg:-DDEBUG\narg:-I../include\n",
            file.display()
        )));
}

#[cfg(unix)]
#[test]
fn test_tool_stderr_is_forwarded_and_summarized() {
    let project = Project::new().with_config("--enable=all\n");
    let cppcheck = project.fake_cppcheck(
        r"printf 'START_ERROR\nfile:main.cpp\nline:1\nseverity:error\nmessage:boom\nid:nullPointer\nSTOP_ERROR\n' >&2",
    );

    project
        .command(&cppcheck, &project.path("src/main.cpp"))
        .assert()
        .success()
        .stderr(predicate::str::contains("message:boom"))
        .stderr(predicate::str::contains("1 errors"));
}

// ============================================================================
// Relative and non-canonical target paths
// ============================================================================

#[test]
fn test_relative_miss_reports_target_as_given() {
    let project = Project::new().with_config("--enable=all\n");

    project
        .command("cppcheck", Path::new("src/unknown.cpp"))
        .current_dir(project.dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No compile command found for file: src/unknown.cpp",
        ));
}

#[test]
fn test_parent_dir_target_does_not_use_sibling_config() {
    let project = Project::new();
    fs::write(project.path("build/.cppcheck-config"), "--enable=all\n").unwrap();

    // src/ and the project root have no config; build/ is a sibling of src/.
    project
        .command("cppcheck", &project.path("build/../src/main.cpp"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No .cppcheck-config file found"));
}

#[cfg(unix)]
#[test]
fn test_relative_target_matches_relative_entry() {
    let project = Project::new().with_config("--enable=all\n");
    let db = serde_json::json!([
        {"directory": ".", "command": "g++ -c src/main.cpp", "file": "src/main.cpp"}
    ]);
    fs::write(project.path("build/compile_commands.json"), db.to_string()).unwrap();
    let cppcheck = project.fake_cppcheck(ECHO_ARGS);

    project
        .command(&cppcheck, Path::new("./src/main.cpp"))
        .current_dir(project.dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("arg:--file-filter=src/main.cpp\n"))
        .stdout(predicate::str::contains("arg:--enable=all"));
}
