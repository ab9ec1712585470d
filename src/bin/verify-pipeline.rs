//! Sanity checks for the CI pipeline definition.
//!
//! Confirms the workflow file exists, that it does not reference the retired
//! dependency scanner, that it runs the current one, and that the repository
//! actually contains test files and the test runner configuration.

use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "verify-pipeline")]
#[command(about = "Verify the CI/CD pipeline configuration")]
struct Cli {
    /// Repository root to inspect
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Workflow file, relative to the root
    #[arg(long, default_value = ".github/workflows/ci-cd.yml")]
    workflow: PathBuf,

    /// Marker that must not appear in the workflow (repeatable)
    #[arg(
        long = "forbid",
        default_values_t = [String::from("safety check"), String::from("safety scan")]
    )]
    forbidden: Vec<String>,

    /// Marker that must appear in the workflow
    #[arg(long = "require", default_value = "pip-audit")]
    required: String,

    /// Test file name prefix
    #[arg(long, default_value = "test_")]
    test_prefix: String,

    /// Test file name suffix
    #[arg(long, default_value = ".py")]
    test_suffix: String,

    /// File that must exist in the root
    #[arg(long, default_value = "pytest.ini")]
    required_file: PathBuf,
}

#[derive(Debug, Error)]
enum CheckError {
    #[error("CI/CD workflow file not found: {}", .0.display())]
    WorkflowMissing(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("found forbidden reference '{0}' in workflow")]
    ForbiddenMarker(String),
    #[error("'{0}' not found in workflow")]
    RequiredMarkerMissing(String),
    #[error("no test files found")]
    NoTestFiles,
    #[error("{} not found", .0.display())]
    RequiredFileMissing(PathBuf),
}

/// Run every check in order, reporting each pass, and stop at the first failure.
fn verify(cli: &Cli) -> Result<(), CheckError> {
    let workflow = cli.root.join(&cli.workflow);
    if !workflow.is_file() {
        return Err(CheckError::WorkflowMissing(workflow));
    }
    println!("✅ CI/CD workflow file found");

    let content = fs::read_to_string(&workflow).map_err(|source| CheckError::Io {
        path: workflow.clone(),
        source,
    })?;

    if let Some(marker) = cli.forbidden.iter().find(|m| content.contains(m.as_str())) {
        return Err(CheckError::ForbiddenMarker(marker.clone()));
    }
    println!("✅ No forbidden references found");

    if !content.contains(&cli.required) {
        return Err(CheckError::RequiredMarkerMissing(cli.required.clone()));
    }
    println!("✅ {} found in workflow", cli.required);

    let mut test_files = Vec::new();
    collect_matching(&cli.root, &cli.test_prefix, &cli.test_suffix, &mut test_files)?;
    if test_files.is_empty() {
        return Err(CheckError::NoTestFiles);
    }
    println!("✅ Found {} test files", test_files.len());

    let required_file = cli.root.join(&cli.required_file);
    if !required_file.is_file() {
        return Err(CheckError::RequiredFileMissing(cli.required_file.clone()));
    }
    println!("✅ {} found", cli.required_file.display());

    Ok(())
}

/// Recursively collect files under `dir` whose name has the given prefix and suffix.
///
/// Only an unreadable `dir` is an error; unreadable entries and
/// subdirectories below it are reported and skipped.
fn collect_matching(
    dir: &Path,
    prefix: &str,
    suffix: &str,
    found: &mut Vec<PathBuf>,
) -> Result<(), CheckError> {
    let entries = fs::read_dir(dir).map_err(|source| CheckError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let (entry, file_type) = match entry.and_then(|e| e.file_type().map(|t| (e, t))) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("⚠️  skipping entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        if file_type.is_dir() {
            if let Err(e) = collect_matching(&path, prefix, suffix, found) {
                eprintln!("⚠️  skipping {}", e);
            }
        } else if file_type.is_file() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(prefix) && name.ends_with(suffix) {
                found.push(path);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("🔍 Verifying CI/CD Pipeline Configuration...");
    println!("{}", "=".repeat(50));

    match verify(&cli) {
        Ok(()) => {
            println!("{}", "=".repeat(50));
            println!("✅ All checks passed! Pipeline should work correctly.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GOOD_WORKFLOW: &str = "jobs:\n  audit:\n    steps:\n      - run: pip-audit\n";

    fn cli_for(root: &Path) -> Cli {
        Cli::parse_from(["verify-pipeline", "--root", root.to_str().unwrap()])
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn healthy_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".github/workflows/ci-cd.yml", GOOD_WORKFLOW);
        write(dir.path(), "api/app1/test_views.py", "");
        write(dir.path(), "pytest.ini", "[pytest]\n");
        dir
    }

    #[test]
    fn test_healthy_repo_passes() {
        let dir = healthy_repo();
        assert!(verify(&cli_for(dir.path())).is_ok());
    }

    #[test]
    fn test_missing_workflow() {
        let dir = TempDir::new().unwrap();
        let err = verify(&cli_for(dir.path())).unwrap_err();
        assert!(matches!(err, CheckError::WorkflowMissing(_)));
    }

    #[test]
    fn test_forbidden_markers() {
        for marker in ["safety check", "safety scan"] {
            let dir = healthy_repo();
            write(
                dir.path(),
                ".github/workflows/ci-cd.yml",
                &format!("{GOOD_WORKFLOW}      - run: {marker}\n"),
            );

            let err = verify(&cli_for(dir.path())).unwrap_err();
            assert!(matches!(err, CheckError::ForbiddenMarker(ref m) if m == marker));
        }
    }

    #[test]
    fn test_required_marker_missing() {
        let dir = healthy_repo();
        write(dir.path(), ".github/workflows/ci-cd.yml", "jobs: {}\n");

        let err = verify(&cli_for(dir.path())).unwrap_err();
        assert!(matches!(err, CheckError::RequiredMarkerMissing(_)));
    }

    #[test]
    fn test_no_test_files() {
        let dir = healthy_repo();
        fs::remove_file(dir.path().join("api/app1/test_views.py")).unwrap();
        write(dir.path(), "api/app1/views.py", "");
        write(dir.path(), "test_notes.txt", "");

        let err = verify(&cli_for(dir.path())).unwrap_err();
        assert!(matches!(err, CheckError::NoTestFiles));
    }

    #[test]
    fn test_missing_required_file() {
        let dir = healthy_repo();
        fs::remove_file(dir.path().join("pytest.ini")).unwrap();

        let err = verify(&cli_for(dir.path())).unwrap_err();
        assert!(matches!(err, CheckError::RequiredFileMissing(_)));
    }

    #[test]
    fn test_collects_nested_matches_only() {
        let dir = healthy_repo();
        write(dir.path(), "test_basic.py", "");
        write(dir.path(), "deep/er/test_more.py", "");
        write(dir.path(), "deep/conftest.py", "");

        let mut found = Vec::new();
        collect_matching(dir.path(), "test_", ".py", &mut found).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut found = Vec::new();
        let err = collect_matching(&dir.path().join("missing"), "test_", ".py", &mut found)
            .unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = healthy_repo();
        write(dir.path(), "postgres-data/test_hidden.py", "");
        let locked = dir.path().join("postgres-data");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = verify(&cli_for(dir.path()));
        let mut found = Vec::new();
        let walked = collect_matching(dir.path(), "test_", ".py", &mut found);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_ok());
        assert!(walked.is_ok());
        assert!(found.iter().any(|p| p.ends_with("api/app1/test_views.py")));
    }

    #[test]
    fn test_custom_markers() {
        let dir = healthy_repo();
        write(dir.path(), ".github/workflows/ci-cd.yml", "run: cargo audit\n");

        let cli = Cli::parse_from([
            "verify-pipeline",
            "--root",
            dir.path().to_str().unwrap(),
            "--require",
            "cargo audit",
        ]);
        assert!(verify(&cli).is_ok());
    }
}
