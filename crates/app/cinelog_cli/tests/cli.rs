use assert_cmd::Command;
use predicates::prelude::*;

fn cinelog() -> Command {
    Command::cargo_bin("cinelog").unwrap()
}

#[test]
fn version_prints_name_and_version() {
    cinelog()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cinelog"));
}

#[test]
fn whoami_is_anonymous_with_a_fresh_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    cinelog()
        .env("CINELOG_DATA_DIR", dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_when_anonymous_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    cinelog()
        .env("CINELOG_DATA_DIR", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
}

#[test]
fn admin_delete_without_confirmation_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    cinelog()
        .env("CINELOG_DATA_DIR", dir.path())
        .args(["admin", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}
