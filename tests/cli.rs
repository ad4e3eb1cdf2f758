//! End-to-end tests of the `scaffold` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scaffold(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("SCAFFOLD_SCHEMA")
        .env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    scaffold(&dir).arg("init").assert().success();
    dir
}

#[test]
fn test_init_writes_sample() {
    let dir = TempDir::new().unwrap();

    scaffold(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold.json"));

    assert!(dir.path().join("scaffold.json").is_file());

    scaffold(&dir).arg("init").assert().failure();
}

#[test]
fn test_validate() {
    let dir = initialized();

    scaffold(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (5 tables)"));
}

#[test]
fn test_missing_schema() {
    let dir = TempDir::new().unwrap();

    scaffold(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("scaffold.json").and(predicate::str::contains("scaffold init")));
}

#[test]
fn test_relationships_json() {
    let dir = initialized();

    let output = scaffold(&dir)
        .args(["relationships", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let graph: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph["profiles"][0]["kind"], "belongsTo");
    assert_eq!(graph["users"][0]["kind"], "hasMany");
    assert_eq!(graph["role_user"][0]["kind"], "belongsToMany");
}

#[test]
fn test_relationships_answers_from_stdin() {
    let dir = initialized();

    // profiles: no to both questions; posts: default
    let output = scaffold(&dir)
        .arg("relationships")
        .write_stdin("n\nn\n\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let graph: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph["users"][0]["kind"], "hasOne");

    let prompts = String::from_utf8(output.stderr).unwrap();
    assert!(prompts.contains("Profiles belong to Users (one to many)"));
    assert!(prompts.contains("Got it, so a user has one profile."));
}

#[test]
fn test_pivot() {
    let dir = initialized();

    scaffold(&dir)
        .args(["pivot", "role_user"])
        .assert()
        .success()
        .stdout("role_user is a pivot table\n");

    scaffold(&dir)
        .args(["pivot", "user_role_archive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple underscores"));
}

#[test]
fn test_make() {
    let dir = initialized();

    scaffold(&dir)
        .args(["make", "--yes", "--out", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scaffolding Complete"));

    let model = std::fs::read_to_string(dir.path().join("site/app/User.php")).unwrap();
    assert!(model.contains("use SoftDeletes;"));
    assert!(model.contains("return $this->hasMany(\\App\\Post::class);"));

    let migrations = std::fs::read_dir(dir.path().join("site/database/migrations"))
        .unwrap()
        .count();
    assert_eq!(migrations, 5);
    assert!(!dir.path().join("site/app/RoleUser.php").exists());
}

#[test]
fn test_make_keeps_existing_files() {
    let dir = initialized();

    scaffold(&dir)
        .args(["make", "--yes", "--no-migrations"])
        .assert()
        .success();

    let model = dir.path().join("app/User.php");
    std::fs::write(&model, "<?php // edited").unwrap();

    scaffold(&dir)
        .args(["make", "--yes", "--no-migrations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));
    assert_eq!(std::fs::read_to_string(&model).unwrap(), "<?php // edited");

    scaffold(&dir)
        .args(["make", "--yes", "--no-migrations", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&model).unwrap().contains("class User extends Model"));
}
