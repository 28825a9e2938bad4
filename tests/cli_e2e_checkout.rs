//! End-to-end tests for the `mbed-project checkout` command.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_checkout_help() {
    let fixture = ProgramFixture::new();
    fixture
        .command()
        .args(["checkout", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--revision"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_checkout_without_revision_when_up_to_date() {
    // Nothing is pinned and nothing is missing, so git is never needed.
    let fixture = ProgramFixture::new()
        .with_program(MBED_OS_URL)
        .with_platform();

    fixture
        .command()
        .arg("checkout")
        .assert()
        .success()
        .stdout(predicate::str::contains("are up to date"));
}

#[test]
fn test_checkout_without_revision_fetches_missing_libraries() {
    let fixture = ProgramFixture::new().with_program(MBED_OS_URL);

    // The failure comes from the clone, not from argument parsing.
    fixture
        .command()
        .arg("checkout")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to synchronise libraries"))
        .stderr(predicate::str::contains(format!(
            "Cloning git repository from url '{}' failed.",
            MBED_OS_URL
        )));
}

#[test]
fn test_checkout_outside_program() {
    let fixture = ProgramFixture::new();

    fixture
        .command()
        .args(["checkout", "--revision", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to check out revision 'main'"))
        .stderr(predicate::str::contains("No program found"));
}

#[test]
fn test_checkout_revision_reports_vcs_failure() {
    let fixture = ProgramFixture::new().with_program(MBED_OS_URL);

    fixture
        .command()
        .args(["checkout", "--revision", "main", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to check out revision 'main'"));
}
