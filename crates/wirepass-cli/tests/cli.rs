// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end runs of the `wirepass` binary.

use predicates::prelude::*;

fn wirepass() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("wirepass");
    cmd.env_remove("WIREPASS_ENDIAN")
        .env_remove("WIREPASS_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn dynsize_reports_resize() {
    wirepass()
        .arg("dynsize")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync_len: len=2 changed=true"))
        .stdout(predicate::str::contains("decoded: [123, 234]"))
        .stdout(predicate::str::contains("01000000020000007b000000ea000000"));
}

#[test]
fn dynsize_big_endian_from_env() {
    wirepass()
        .arg("dynsize")
        .env("WIREPASS_ENDIAN", "big")
        .assert()
        .success()
        .stdout(predicate::str::contains("00000001000000020000007b000000ea"));
}

#[test]
fn evolve_prints_every_hop() {
    wirepass()
        .args(["evolve", "--endian", "big"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "v1 -> v2 (8 bytes): field=1 field_added_v2=0 field_added_v3=0",
        ))
        .stdout(predicate::str::contains(
            "v2 -> v3 (9 bytes): field=1 field_added_v2=2 field_added_v3=0",
        ))
        .stdout(predicate::str::contains(
            "v3 -> v1 (11 bytes): field=1 field_added_v2=0 field_added_v3=0",
        ));
}

#[test]
fn inspect_json_is_parseable() {
    let output = wirepass()
        .args(["--json", "inspect"])
        .output()
        .expect("run wirepass");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["endian"], "little");
    assert_eq!(report["total"], 46);
    let fields = report["fields"].as_array().expect("fields");
    assert_eq!(fields.len(), 11);
    assert_eq!(fields[1]["name"], "i8");
    assert_eq!(fields[1]["offset"], 4);
    assert_eq!(fields[1]["width"], 1);
    assert_eq!(fields[1]["hex"], "ce");
}

#[test]
fn truncate_reports_checked_error() {
    wirepass()
        .args(["truncate", "--keep", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 9 of 46 bytes  cursor after read: 46"))
        .stdout(predicate::str::contains("  i16  ok"))
        .stdout(predicate::str::contains("  u16  lost"))
        .stdout(predicate::str::contains(
            "checked: buffer too short: pass needed 46 bytes, buffer holds 9",
        ));
}

#[test]
fn logs_go_to_stderr() {
    wirepass()
        .args(["dynsize", "--log-level", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("dispatch"));
}

#[test]
fn bad_log_filter_fails() {
    wirepass()
        .args(["inspect", "--log-level", "wirepass=loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log filter"));
}

#[test]
fn truncate_without_keep_is_usage_error() {
    wirepass()
        .arg("truncate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--keep"));
}
