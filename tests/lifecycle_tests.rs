//! Upgrade, invoke, uninstall, show and list against installed bundles

mod common;

use common::{APP, TestEnv};
use predicates::prelude::*;

fn installed() -> TestEnv {
    let env = TestEnv::with_app();
    env.cmd()
        .args(["install", "-f", "bundle.json", "-p", "db#user=admin"])
        .assert()
        .success();
    env
}

#[test]
fn test_upgrade_by_installation_name() {
    let env = installed();

    env.cmd()
        .args(["upgrade", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Executing dependency db..."))
        .stdout(predicate::str::contains("Finished upgrade on app"));

    assert_eq!(env.read_installation("app")["action"], "upgrade");
    let db = env.read_installation("app-db");
    assert_eq!(db["action"], "upgrade");
    // Recorded parameters carry over
    assert_eq!(db["parameters"]["user"], "admin");
}

#[test]
fn test_upgrade_unknown_installation() {
    let env = TestEnv::with_app();

    env.cmd()
        .args(["upgrade", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Installation 'missing' not found"));
}

#[test]
fn test_invoke_custom_action() {
    let env = installed();

    env.cmd()
        .args(["invoke", "app", "--action", "backup", "-f", "bundle.json"])
        .assert()
        .failure()
        // The dependencies do not declare the action
        .stderr(predicate::str::contains(
            "Error executing dependency db: Action 'backup' is not defined by bundle mysql",
        ));
}

#[test]
fn test_uninstall_removes_parent_then_dependencies() {
    let env = installed();

    let output = env
        .cmd()
        .args(["uninstall", "app"])
        .output()
        .expect("Failed to run stevedore");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parent = stdout.find("\"installation\": \"app\"").unwrap();
    let db = stdout.find("Executing dependency db...").unwrap();
    assert!(parent < db);

    assert!(!env.installation_path("app").exists());
    assert!(!env.installation_path("app-db").exists());
    assert!(!env.installation_path("app-cache").exists());
}

#[test]
fn test_show_installation() {
    let env = installed();

    env.cmd()
        .args(["show", "app-db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle: mysql 0.1.0"))
        .stdout(predicate::str::contains("Last action: install (succeeded)"))
        .stdout(predicate::str::contains("user: admin"))
        .stdout(predicate::str::contains("connstr: mysql://db:3306"));
}

#[test]
fn test_show_unknown_installation() {
    let env = TestEnv::new();

    env.cmd()
        .args(["show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Installation 'missing' not found"));
}

#[test]
fn test_list_installations() {
    let env = installed();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installations (3):"))
        .stdout(predicate::str::contains("app-cache  redis 0.2.0  install (succeeded)"));
}

#[test]
fn test_list_empty() {
    let env = TestEnv::new();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No installations found."));
}

#[test]
fn test_reinstall_from_reference_is_cached() {
    let env = installed();
    env.cmd().args(["install", "-r", APP]).assert().success();

    // Republishing has no effect until the pull is forced
    env.publish(
        common::MYSQL,
        &common::mysql_bundle().replace("0.1.0", "0.1.1"),
        None,
    );
    env.cmd().args(["install", "-r", APP]).assert().success();
    assert_eq!(env.read_installation("app-db")["bundle"]["version"], "0.1.0");

    env.cmd()
        .args(["install", "-r", APP, "--force"])
        .assert()
        .success();
    assert_eq!(env.read_installation("app-db")["bundle"]["version"], "0.1.1");
}

#[test]
fn test_version() {
    TestEnv::new()
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stevedore"));
}

#[test]
fn test_completions() {
    TestEnv::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stevedore"));
}
