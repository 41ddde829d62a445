use clap::Parser;
use codeowner::{run, Cli, CliError};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug)]
struct Output {
    stdout: String,
    stderr: String,
}

fn execute<I, T>(args: I) -> Result<Output, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).expect("arguments should parse");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    run(&cli, &mut stdout, &mut stderr)?;
    Ok(Output {
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    })
}

fn repo_with_main() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.go"),
        "// CodeOwner: @backend\npackage main\n",
    )
    .unwrap();
    dir
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_version_subcommand() {
    let out = execute(["codeowner", "version"]).unwrap();
    assert!(out.stdout.starts_with("codeowner "));
    assert!(out.stdout.contains("commit:"));
    assert!(out.stdout.ends_with('\n'));
}

#[test]
fn test_no_annotations_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.txt"), "no annotations here\n").unwrap();

    let out = execute(["codeowner".to_string(), arg(dir.path())]).unwrap();
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("no CodeOwner annotations found"));
}

#[test]
fn test_invalid_directory() {
    let err = execute(["codeowner", "/nonexistent/path/that/does/not/exist"]).unwrap_err();
    assert!(matches!(err, CliError::Scan(_)));
    assert!(err.to_string().starts_with("scanning directory:"));
}

#[test]
fn test_too_many_args() {
    assert!(Cli::try_parse_from(["codeowner", "arg1", "arg2"]).is_err());
}

#[test]
fn test_protect() {
    let dir = repo_with_main();
    let out = execute([
        "codeowner".to_string(),
        "--protect".to_string(),
        "@admin @platform".to_string(),
        arg(dir.path()),
    ])
    .unwrap();

    assert_eq!(out.stdout, "CODEOWNERS @admin @platform\n\n/main.go @backend\n");
}

#[test]
fn test_protect_invalid_owner() {
    let dir = repo_with_main();
    let err = execute([
        "codeowner".to_string(),
        "--protect".to_string(),
        "no-at-sign".to_string(),
        arg(dir.path()),
    ])
    .unwrap_err();

    assert!(matches!(err, CliError::Protect(_)));
    assert!(err.to_string().contains("--protect"));
}

#[test]
fn test_protect_alone_is_enough_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = execute([
        "codeowner".to_string(),
        "--protect".to_string(),
        "@admin".to_string(),
        arg(dir.path()),
    ])
    .unwrap();

    assert_eq!(out.stdout, "CODEOWNERS @admin\n");
    assert!(out.stderr.is_empty());
}

#[test]
fn test_no_protect() {
    let dir = repo_with_main();
    let out = execute(["codeowner".to_string(), arg(dir.path())]).unwrap();

    assert!(!out.stdout.contains("CODEOWNERS"));
    assert_eq!(out.stdout, "/main.go @backend\n");
}

#[test]
fn test_custom_prefix_and_dirowner() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.rs"), "// Owner: @rust-team\n").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("OWNERS"), "@docs-team\n").unwrap();

    let out = execute([
        "codeowner".to_string(),
        "--prefix".to_string(),
        "Owner:".to_string(),
        "--dirowner".to_string(),
        "OWNERS".to_string(),
        arg(dir.path()),
    ])
    .unwrap();

    assert_eq!(out.stdout, "/lib.rs @rust-team\n\n/docs/ @docs-team\n");
}

#[test]
fn test_config_file_with_flag_override() {
    let dir = repo_with_main();
    fs::write(dir.path().join("notes.txt"), "Owner: @notes-team\n").unwrap();
    let config = dir.path().join("codeowner.toml");
    fs::write(&config, "prefix = \"Owner:\"\n").unwrap();

    let out = execute([
        "codeowner".to_string(),
        "--config".to_string(),
        arg(&config),
        arg(dir.path()),
    ])
    .unwrap();
    assert_eq!(out.stdout, "/notes.txt @notes-team\n");

    let out = execute([
        "codeowner".to_string(),
        "--config".to_string(),
        arg(&config),
        "--prefix".to_string(),
        "CodeOwner:".to_string(),
        arg(dir.path()),
    ])
    .unwrap();
    assert_eq!(out.stdout, "/main.go @backend\n");
}

#[test]
fn test_bad_config_file() {
    let dir = repo_with_main();
    let config = dir.path().join("codeowner.toml");
    fs::write(&config, "prefix = 3\n").unwrap();

    let err = execute([
        "codeowner".to_string(),
        "--config".to_string(),
        arg(&config),
        arg(dir.path()),
    ])
    .unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
#[serial]
fn test_scans_current_directory_by_default() {
    let dir = repo_with_main();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = execute(["codeowner"]);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(result.unwrap().stdout, "/main.go @backend\n");
}

#[test]
fn test_testdata_tree() {
    let testdata = Path::new(env!("CARGO_MANIFEST_DIR")).join("../testdata");
    let out = execute(["codeowner".to_string(), arg(&testdata)]).unwrap();

    let lines: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(lines[0], "/Dockerfile @docker_owner");
    assert!(lines.contains(&"/Example.java @java_owner"));
    assert!(lines.contains(&"/dirowner/ @dir-owner"));

    let hidden = lines
        .iter()
        .position(|l| *l == "/.github/workflows/ci.yml @devops-team")
        .unwrap();
    let nested = lines
        .iter()
        .position(|l| *l == "/nested/handler.go @api-team")
        .unwrap();
    assert!(hidden < nested);
    assert_eq!(lines[hidden - 1], "");
}
