use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";

/// Command with its config directory pointed at an empty temp dir
fn cscheck(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cscheck").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("CSCHECK_HASH__DEFAULT_ALGORITHM")
        .env_remove("CSCHECK_OUTPUT__DEFAULT_FORMAT");
    cmd
}

fn hello_file() -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), b"hello").unwrap();
    temp_file
}

#[test]
fn test_version() {
    let config_home = TempDir::new().unwrap();
    cscheck(&config_home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_match_exits_zero() {
    let config_home = TempDir::new().unwrap();
    let file = hello_file();

    cscheck(&config_home)
        .args(["check", HELLO_SHA256.to_uppercase().as_str()])
        .arg(file.path())
        .args(["--algorithm", "sha256", "--no-progress"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Result: MATCH"))
        .stdout(predicate::str::contains("Bytes read: 5 / 5"))
        .stdout(predicate::str::contains("Operation achieved in "));
}

#[test]
fn test_check_mismatch_exits_two() {
    let config_home = TempDir::new().unwrap();
    let file = hello_file();

    cscheck(&config_home)
        .args(["check", &HELLO_SHA256[..60]])
        .arg(file.path())
        .args(["-a", "SHA256", "--no-progress"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Result: MISMATCH"))
        .stdout(predicate::str::contains(HELLO_SHA256));
}

#[test]
fn test_unknown_algorithm_falls_back_to_sha256() {
    let config_home = TempDir::new().unwrap();
    let file = hello_file();

    cscheck(&config_home)
        .args(["check", HELLO_SHA256])
        .arg(file.path())
        .args(["--algorithm", "crc32", "--no-progress"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains(
            "Unknown hashing algorithm, default back to SHA256",
        ))
        .stdout(predicate::str::contains("Algorithm: SHA256"));
}

#[test]
fn test_default_algorithm_from_environment() {
    let config_home = TempDir::new().unwrap();
    let file = hello_file();

    cscheck(&config_home)
        .env("CSCHECK_HASH__DEFAULT_ALGORITHM", "md5")
        .args(["check", HELLO_MD5])
        .arg(file.path())
        .arg("--no-progress")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Algorithm: MD5"));
}

#[test]
fn test_check_json_output() {
    let config_home = TempDir::new().unwrap();
    let file = hello_file();

    let output = cscheck(&config_home)
        .args(["check", HELLO_MD5])
        .arg(file.path())
        .args(["-a", "md5", "--format", "json", "--no-progress"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["result"], "match");
    assert_eq!(parsed["generated_hash"], HELLO_MD5);
    assert_eq!(parsed["total_bytes"], 5);
}

#[test]
fn test_missing_file_exits_one() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    cscheck(&config_home)
        .args(["check", HELLO_SHA256])
        .arg(dir.path().join("missing.iso"))
        .arg("--no-progress")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Operation failed: File not found"));
}

#[test]
fn test_algorithms_lists_all() {
    let config_home = TempDir::new().unwrap();

    cscheck(&config_home)
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("GOST3411"))
        .stdout(predicate::str::contains("WHIRLPOOL"))
        .stdout(predicate::str::contains("SHA256").and(predicate::str::contains("(default)")));
}

#[test]
fn test_config_set_then_get() {
    let config_home = TempDir::new().unwrap();

    cscheck(&config_home)
        .args(["config", "set", "hash.default_algorithm", "sha1"])
        .assert()
        .success();

    cscheck(&config_home)
        .args(["config", "get", "hash.default_algorithm"])
        .assert()
        .success()
        .stdout("SHA1\n");

    assert!(config_home.path().join("cscheck/config.toml").exists());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let config_home = TempDir::new().unwrap();

    cscheck(&config_home)
        .args(["config", "set", "client.chunk_size", "4096"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_completions() {
    let config_home = TempDir::new().unwrap();

    cscheck(&config_home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cscheck"));
}
