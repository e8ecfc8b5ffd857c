use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const LEGACY: &str = "class CreateUser < Telephone::Service\n  argument :user, required: true\nend\n";
const MIGRATED: &str = "class CreateUser < Telephone::Service\n  argument :user, required: true, validates: { presence: true }\nend\n";

fn telephone(cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("telephone");
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("TELEPHONE_LOG")
        .env_remove("TELEPHONE_LOG_FORMAT")
        .env_remove("TELEPHONE_CONFIG");
    cmd
}

fn services(tmp: &TempDir) -> std::path::PathBuf {
    let dir = tmp.path().join("app/services");
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn migrates_default_path() {
    let tmp = TempDir::new().unwrap();
    let dir = services(&tmp);
    fs::write(dir.join("create_user.rb"), LEGACY).unwrap();

    telephone(tmp.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("rewrote"))
        .stdout(predicate::str::contains("1 file(s) rewritten"));

    assert_eq!(fs::read_to_string(dir.join("create_user.rb")).unwrap(), MIGRATED);
}

#[test]
fn check_fails_when_files_need_migration() {
    let tmp = TempDir::new().unwrap();
    let dir = services(&tmp);
    fs::write(dir.join("create_user.rb"), LEGACY).unwrap();

    telephone(tmp.path())
        .args(["migrate", "--check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would rewrite"))
        .stderr(predicate::str::contains("still use `required: true`"));

    assert_eq!(fs::read_to_string(dir.join("create_user.rb")).unwrap(), LEGACY);
}

#[test]
fn check_passes_on_migrated_tree() {
    let tmp = TempDir::new().unwrap();
    let dir = services(&tmp);
    fs::write(dir.join("create_user.rb"), MIGRATED).unwrap();

    telephone(tmp.path())
        .args(["migrate", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 file(s) to rewrite"));
}

#[test]
fn dry_run_leaves_files_alone() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.rb"), LEGACY).unwrap();

    telephone(tmp.path())
        .args(["migrate", ".", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would rewrite"));

    assert_eq!(fs::read_to_string(tmp.path().join("a.rb")).unwrap(), LEGACY);
}

#[test]
fn extension_flag_replaces_configured_list() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.rb"), LEGACY).unwrap();
    fs::write(tmp.path().join("b.rake"), LEGACY).unwrap();

    telephone(tmp.path())
        .args(["migrate", ".", "--ext", "rake"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(tmp.path().join("a.rb")).unwrap(), LEGACY);
    assert_eq!(fs::read_to_string(tmp.path().join("b.rake")).unwrap(), MIGRATED);
}

#[test]
fn config_file_in_working_directory_is_used() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("telephone.toml"),
        "[migrate]\nexclude = [\"legacy\"]\n",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("legacy")).unwrap();
    fs::write(tmp.path().join("legacy/old.rb"), LEGACY).unwrap();
    fs::write(tmp.path().join("new.rb"), LEGACY).unwrap();

    telephone(tmp.path())
        .args(["migrate", "."])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(tmp.path().join("legacy/old.rb")).unwrap(), LEGACY);
    assert_eq!(fs::read_to_string(tmp.path().join("new.rb")).unwrap(), MIGRATED);
}

#[test]
fn explicit_config_flag_must_exist() {
    let tmp = TempDir::new().unwrap();

    telephone(tmp.path())
        .args(["migrate", ".", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();

    telephone(tmp.path())
        .arg("migrate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("migration root not found"));
}

#[test]
fn invalid_log_format_is_rejected() {
    let tmp = TempDir::new().unwrap();

    telephone(tmp.path())
        .args(["--log-format", "xml", "migrate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log format"));
}
