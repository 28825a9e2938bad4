//! End-to-end tests for the `mbed-project init` command.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_init_help() {
    let fixture = ProgramFixture::new();
    fixture
        .command()
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create a new Mbed program"))
        .stdout(predicate::str::contains("--create-only"))
        .stdout(predicate::str::contains("--max-rounds"));
}

#[test]
fn test_init_requires_path() {
    let fixture = ProgramFixture::new();
    fixture.command().arg("init").assert().failure().code(2);
}

#[test]
fn test_init_refuses_to_nest_programs() {
    let fixture = ProgramFixture::new().with_program(MBED_OS_URL);

    fixture
        .command()
        .args(["init", "libs/nested", "--create-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "It is not possible to nest Mbed programs",
        ));

    fixture.child("libs").assert(predicate::path::missing());
}

#[test]
fn test_init_reports_missing_git() {
    let fixture = ProgramFixture::new();

    fixture
        .command()
        .args(["init", "blinky", "--create-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to initialise git repository at path",
        ));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_init_create_only() {
    let fixture = ProgramFixture::new();

    fixture
        .command_with_git()
        .args(["init", "blinky", "--create-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Mbed program"));

    fixture.child("blinky/.mbed").assert(predicate::path::is_file());
    fixture
        .child("blinky/mbed_app.json")
        .assert(predicate::path::is_file());
    fixture
        .child("blinky/mbed-os.lib")
        .assert(predicate::str::contains(MBED_OS_URL));
    fixture.child("blinky/.git").assert(predicate::path::is_dir());
    fixture.child("blinky/mbed-os").assert(predicate::path::missing());
}
