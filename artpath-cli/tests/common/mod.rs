//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated home directory
//! - Command builder helpers for common patterns
//! - Configuration fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Configuration registering a custom root and an authenticated root.
#[allow(dead_code)]
pub const CUSTOM_ROOTS: &str = "\
http://custom/root: {}
http://secure.example.com/artifactory:
  username: deployer
  password: secret
  verify: false
";

/// Test environment with an isolated home directory.
///
/// `HOME` points into the temporary directory so a developer's own
/// `~/.artpath/config.yaml` never leaks into a test.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with an isolated home and no config override.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("artpath").expect("Failed to find artpath binary");
        cmd.env("HOME", &self.temp_path)
            .env("USERPROFILE", &self.temp_path)
            .env_remove("ARTPATH_CONFIG")
            .env_remove("ARTPATH_LOG_MODE");
        cmd
    }

    /// Get a command builder with `--config` pointing at a file holding
    /// `contents`.
    pub fn command_with_config(&self, contents: &str) -> Command {
        let path = self.write_file("config.yaml", contents);
        let mut cmd = self.command();
        cmd.arg("--config").arg(path);
        cmd
    }

    /// Write the per-user default configuration file.
    pub fn write_default_config(&self, contents: &str) -> PathBuf {
        let dir = self.temp_path.join(".artpath");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write default config");
        path
    }

    /// Write a file under the temporary directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }
}

/// Parse a command's stdout as JSON.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
