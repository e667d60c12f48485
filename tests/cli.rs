// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn renders_a_small_image() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("small.bmp");
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .arg("--output")
        .arg(&output)
        .args(&["--size", "32x18", "--iterations", "100", "--oversampling", "1"])
        .args(&["--center", "-0.5,0.0"])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn renders_with_the_escaped_policy_and_linear_shaping() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("escaped.png");
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "24x16", "-i", "60", "-p", "2"])
        .args(&["--policy", "escaped", "--shaping", "linear", "--gain", "3"])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn warns_when_gain_has_no_linear_shaping() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("cuberoot.bmp");
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "8x8", "-i", "20", "-p", "1", "--gain", "3"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("--gain only applies with --shaping linear"));
    assert!(output.exists());
}

#[test]
fn rejects_a_zero_iteration_cap() {
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .args(&["--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count"));
}

#[test]
fn rejects_a_malformed_size() {
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .args(&["--size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("output image size"));
}

#[test]
fn reports_write_failures() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("out.bmp");
    Command::cargo_bin("nebulabrot")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "8x8", "-i", "20", "-p", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}
