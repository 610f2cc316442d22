//! TraceWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory
//! - Writing trace and config files into it
//! - Executing CLI commands with that directory as context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleFiles;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use rankscope_testing::TraceWorld;
/// use rankscope_testing::fixtures::SIMPLE_NESTED;
///
/// let world = TraceWorld::new().with_trace("nested.prf", SIMPLE_NESTED);
///
/// let result = world.run(&["info", "nested.prf"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TraceWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
}

impl Default for TraceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceWorld {
    /// Create a new isolated test environment.
    ///
    /// The config path points into the temp directory, so a user's own
    /// config file never leaks into a test run.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            config_path,
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    /// Get the temp directory root (the working directory of CLI runs).
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Absolute path of a file inside the world
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a trace file (relative to the temp root).
    pub fn with_trace(self, name: &str, contents: &str) -> Self {
        self.write(name, contents).expect("Failed to write trace");
        self
    }

    /// Write the config file read by CLI runs.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Copy one of the shared on-disk samples into the world.
    pub fn with_sample(self, sample_name: &str) -> Self {
        self.samples
            .copy_to(sample_name, &self.path(sample_name))
            .expect("Failed to copy sample");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a file without consuming self.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path())
            .env("RANKSCOPE_CONFIG", &self.config_path)
            .env("NO_COLOR", "1");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the CLI with the given arguments.
    ///
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("rankscope")
            .map_err(|e| anyhow::anyhow!("Failed to find rankscope binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
