//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary home directory
//! - Command builder helpers with an isolated environment
//! - Configuration file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Identifier every test command runs with.
pub const TEST_ID: &str = "clitest";

/// Test environment with an isolated home directory.
///
/// Commands built from it see `HOME` pointing at the temporary directory and
/// none of the inherited `CLITEST_*` or `OPTLAYER_*` variables.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary home directory
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().to_path_buf();

        Self { temp_dir, home }
    }

    /// Get a command builder with the isolated environment but no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("optlayer").expect("Failed to find optlayer binary");
        cmd.env("HOME", &self.home)
            .env_remove("OPTLAYER_IDENTIFIER")
            .env_remove("OPTLAYER_LOG_MODE");
        for field in ["TIMEOUT", "NAME", "RATIO", "DEBUG"] {
            cmd.env_remove(format!("CLITEST_{field}"));
            cmd.env_remove(format!("OPTLAYER_DEMO_{field}"));
        }
        cmd
    }

    /// Get a command builder with `--identifier clitest` pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--identifier").arg(TEST_ID);
        cmd
    }

    /// Path of the default configuration file for [`TEST_ID`].
    pub fn config_path(&self) -> PathBuf {
        self.home
            .join(".config")
            .join(TEST_ID)
            .join(format!("{TEST_ID}.toml"))
    }

    /// Write the default configuration file.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write a file under the home directory.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.home.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Get the home path.
    pub fn path(&self) -> &Path {
        &self.home
    }
}
