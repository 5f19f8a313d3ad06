//! Integration tests for error handling and exit codes.
//!
//! These tests verify that optlayer reports errors on stderr and returns
//! the documented exit codes:
//! - Exit code 0: Success
//! - Exit code 2: Invalid arguments or identifier
//! - Exit code 3: The configuration file or environment could not be read
//! - Exit code 4: Unknown field, failed coercion or type mismatch

#![cfg(unix)]

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// Exit Code 2: Arguments
// ============================================================================

#[test]
fn test_unknown_flag_exit_code() {
    let env = TestEnv::new();

    env.command().args(["show", "--bogus"]).assert().code(2);
}

#[test]
fn test_missing_subcommand_exit_code() {
    let env = TestEnv::new();

    env.command().assert().code(2);
}

/// Flags are typed by the namespace, so clap rejects a bad integer.
#[test]
fn test_bad_flag_value_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--timeout", "soon", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("soon"));
}

#[test]
fn test_invalid_identifier_exit_code() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["--identifier", "my app", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid module identifier"));
}

// ============================================================================
// Exit Code 3: Sources
// ============================================================================

/// The file source is strict unless --lenient is given.
#[test]
fn test_missing_config_exit_code() {
    let env = TestEnv::new();

    env.command()
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_explicit_missing_config_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--config", "/nonexistent", "show"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/nonexistent"));
}

#[test]
fn test_malformed_config_exit_code() {
    let env = TestEnv::new();
    env.write_config("timeout = = 3\n");

    env.command()
        .arg("show")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid configuration file"));
}

/// A lenient run warns about a malformed file and carries on.
#[test]
fn test_malformed_config_lenient_warns() {
    let env = TestEnv::new();
    env.write_config("timeout = = 3\n");

    env.command()
        .args(["--lenient", "--timeout", "3", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout = 3"))
        .stderr(predicate::str::contains("WARN"));
}

/// --quiet silences the warning.
#[test]
fn test_quiet_suppresses_warning() {
    let env = TestEnv::new();
    env.write_config("timeout = = 3\n");

    env.command()
        .args(["--quiet", "--lenient", "show"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Exit Code 4: Fields
// ============================================================================

#[test]
fn test_env_coercion_exit_code() {
    let env = TestEnv::new();

    env.command()
        .env("CLITEST_TIMEOUT", "not-a-number")
        .args(["--no-file", "--timeout", "30", "show"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("timeout"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_file_key_exit_code() {
    let env = TestEnv::new();
    env.write_config("colour = \"red\"\n");

    env.command()
        .arg("show")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown field 'colour'"));
}

#[test]
fn test_unknown_env_key_exit_code() {
    let env = TestEnv::new();

    env.command()
        .env("CLITEST_COLOUR", "red")
        .args(["--no-file", "show"])
        .assert()
        .code(4);
}

/// A list cannot be coerced to a number.
#[test]
fn test_uncoercible_file_value_exit_code() {
    let env = TestEnv::new();
    env.write_config("timeout = [1, 2]\n");

    env.command()
        .arg("show")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("cannot coerce"));
}

/// Leniency never excuses a field error.
#[test]
fn test_lenient_keeps_field_errors_fatal() {
    let env = TestEnv::new();
    env.write_config("ratio = \"half\"\n");

    env.command().args(["--lenient", "show"]).assert().code(4);
}
