//! Common test utilities for integration tests.
//!
//! Environment variables are process-global, so every test that touches them
//! holds an [`EnvGuard`] and is marked `#[serial]`.

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

optlayer::namespace! {
    /// The namespace used throughout the integration tests.
    #[derive(Debug, Clone, PartialEq, clap::Parser)]
    #[command(name = "myapp")]
    pub struct MyApp {
        #[arg(long)]
        pub timeout: i64,
        #[arg(long)]
        pub name: String,
        #[arg(long)]
        pub ratio: f64,
    }
}

/// RAII guard for setting and restoring environment variables.
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    pub fn new(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Create a guard that removes the env var.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Removes every variable carrying `prefix` for the lifetime of the guards.
pub fn clear_prefixed_env_vars(prefix: &str) -> Vec<EnvGuard> {
    env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.starts_with(prefix))
        .map(|key| EnvGuard::remove(&key))
        .collect()
}

/// Writes `content` to `dir/filename`, creating parent directories.
pub fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A temporary home directory installed as `HOME`.
///
/// Holds the guards so the previous environment is restored on drop.
pub struct TempHome {
    pub dir: TempDir,
    _home: EnvGuard,
    _cleared: Vec<EnvGuard>,
}

impl TempHome {
    /// Installs a fresh home and clears every `MYAPP_*` variable.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let home = EnvGuard::new("HOME", dir.path());
        let cleared = clear_prefixed_env_vars("MYAPP_");
        Self {
            dir,
            _home: home,
            _cleared: cleared,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `~/.config/myapp/myapp.toml`.
    pub fn write_config(&self, content: &str) -> PathBuf {
        create_temp_config(self.path(), ".config/myapp/myapp.toml", content)
    }
}
