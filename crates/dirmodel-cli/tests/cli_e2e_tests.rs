//! CLI end-to-end tests that invoke the compiled `dirmodel` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const SCHEMA: &str = r#"
paths:
  - name: build
    is_dir: true
    exists: true
    description: Build output
    children:
      - name: out
        is_dir: true
  - name: README.md
"#;

fn dirmodel() -> Command {
    let mut cmd = Command::cargo_bin("dirmodel").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    dirmodel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("paths.yml"));
}

#[test]
fn test_valid_schema_prints_tree_and_creates_directories() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("layout.yml").write_str(SCHEMA).unwrap();

    dirmodel()
        .current_dir(temp.path())
        .args(["layout.yml", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Structure"))
        .stdout(predicate::str::contains("├── build/: Build output"))
        .stdout(predicate::str::contains("│   └── out/"))
        .stdout(predicate::str::contains("└── README.md (missing)"))
        .stdout(predicate::str::contains(
            "Validation successful! All directories are in place.",
        ))
        .stderr(predicate::str::contains("Created directory"));

    temp.child("build/out").assert(predicate::path::is_dir());
}

#[test]
fn test_schema_defaults_to_paths_yml() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("paths.yml").write_str(SCHEMA).unwrap();

    dirmodel().current_dir(temp.path()).assert().success();

    temp.child("build").assert(predicate::path::is_dir());
}

#[test]
fn test_validation_failure_exits_one_without_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("paths.yml")
        .write_str("paths:\n  - name: LICENSE\n    exists: true\n")
        .unwrap();

    dirmodel()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("LICENSE"))
        .stderr(predicate::str::contains("to exist"));
}

#[test]
fn test_missing_schema_file_exits_one() {
    let temp = assert_fs::TempDir::new().unwrap();

    dirmodel()
        .current_dir(temp.path())
        .arg("absent.yml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.yml"));
}

#[test]
fn test_template_variables_come_from_environment() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("paths.yml")
        .write_str("paths:\n  - name: '{{ DIRMODEL_TEST_DIR }}'\n    is_dir: true\n")
        .unwrap();

    dirmodel()
        .current_dir(temp.path())
        .env("DIRMODEL_TEST_DIR", "generated")
        .assert()
        .success();

    temp.child("generated").assert(predicate::path::is_dir());
}

#[test]
fn test_template_variables_come_from_dotenv_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".env")
        .write_str("DIRMODEL_DOTENV_DIR=from_dotenv\n")
        .unwrap();
    temp.child("paths.yml")
        .write_str("paths:\n  - name: '{{ DIRMODEL_DOTENV_DIR }}'\n    is_dir: true\n")
        .unwrap();

    dirmodel()
        .current_dir(temp.path())
        .env_remove("DIRMODEL_DOTENV_DIR")
        .assert()
        .success();

    temp.child("from_dotenv").assert(predicate::path::is_dir());
}

#[test]
fn test_environment_overrides_dotenv_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".env")
        .write_str("DIRMODEL_DOTENV_DIR=from_dotenv\n")
        .unwrap();
    temp.child("paths.yml")
        .write_str("paths:\n  - name: '{{ DIRMODEL_DOTENV_DIR }}'\n    is_dir: true\n")
        .unwrap();

    dirmodel()
        .current_dir(temp.path())
        .env("DIRMODEL_DOTENV_DIR", "from_env")
        .assert()
        .success();

    temp.child("from_env").assert(predicate::path::is_dir());
    temp.child("from_dotenv").assert(predicate::path::missing());
}

#[test]
fn test_unsupported_template_syntax_exits_one() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("paths.yml")
        .write_str("paths:\n  - name: '{{ NAME | upper }}'\n")
        .unwrap();

    dirmodel()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported template syntax"));
}
