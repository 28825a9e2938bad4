//! End-to-end tests for the `mbed-project libs` command.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_libs_help() {
    let fixture = ProgramFixture::new();
    fixture
        .command()
        .args(["libs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List the libraries"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_libs_lists_resolved_and_missing() {
    let fixture = ProgramFixture::new()
        .with_program(&format!("{}#mbed-os-6.2.0", MBED_OS_URL))
        .with_platform()
        .with_file("drivers/sensor.lib", "https://git/sensor\n");

    fixture
        .command()
        .arg("libs")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[missing]   drivers/sensor.lib  https://git/sensor",
        ))
        .stdout(predicate::str::contains(
            "[resolved]  mbed-os.lib         https://github.com/ARMmbed/mbed-os#mbed-os-6.2.0",
        ))
        .stdout(predicate::str::contains("1 of 2 libraries not fetched yet"));
}

#[test]
fn test_libs_ignores_platform_internals() {
    let fixture = ProgramFixture::new()
        .with_program(MBED_OS_URL)
        .with_platform()
        .with_file("mbed-os/TESTS/fixture.lib", "https://git/fixture");

    fixture
        .command()
        .arg("libs")
        .assert()
        .success()
        .stdout(predicate::str::contains("mbed-os.lib"))
        .stdout(predicate::str::contains("fixture").not());
}

#[test]
fn test_libs_from_subdirectory() {
    let fixture = ProgramFixture::new()
        .with_program(MBED_OS_URL)
        .with_dir("source/app");

    fixture
        .command()
        .args(["libs", "source/app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mbed-os.lib"));
}

#[test]
fn test_libs_json() {
    let fixture = ProgramFixture::new()
        .with_program(MBED_OS_URL)
        .with_file("lib/radio.lib", "https://git/radio#abc123");

    let output = fixture
        .command()
        .args(["libs", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let libs = value.as_array().unwrap();
    assert_eq!(libs.len(), 2);
    assert_eq!(libs[0]["name"], "radio");
    assert_eq!(libs[0]["reference_file"], "lib/radio.lib");
    assert_eq!(libs[0]["revision"], "abc123");
    assert_eq!(libs[0]["resolved"], false);
    assert_eq!(libs[1]["name"], "mbed-os");
    assert_eq!(libs[1]["url"], MBED_OS_URL);
}

#[test]
fn test_libs_outside_program() {
    let fixture = ProgramFixture::new();

    fixture
        .command()
        .arg("libs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No program found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_libs_requires_platform_reference() {
    let fixture = ProgramFixture::new().with_file(".mbed", "");

    fixture
        .command()
        .arg("libs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mbed-os.lib is missing"));
}
