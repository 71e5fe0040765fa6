//! Shared E2E test helpers for `rbac` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Default timeout for a single invocation.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Variables that would leak the host environment into a test run.
const HOST_VARS: &[&str] = &["RBAC_GRANTS_FILE", "RBAC_LOG_LEVEL", "RUST_LOG"];

/// Grants used by most tests.
pub const GRANTS: &str = r#"
[[grants]]
user = "admin"
project = "*"
actions = ["*"]
scopes = ["*"]

[[grants]]
user = "alice"
project = "payments"
actions = ["read", "update"]
scopes = ["Dashboard", "Variable"]

[[grants]]
user = "alice"
project = "*"
actions = ["read"]
scopes = ["GlobalDatasource"]
"#;

/// Isolated workspace: `HOME` points inside it so `~/.rbac` never resolves
/// to the real home directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the workspace.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    /// Writes [`GRANTS`] and returns its path.
    pub fn grants(&self) -> PathBuf {
        self.write("grants.toml", GRANTS)
    }

    /// `rbac` command with a clean environment rooted at this workspace.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd: assert_cmd::Command = cargo_bin_cmd!("rbac");
        cmd.timeout(TIMEOUT);
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.path());
        cmd
    }

    /// `rbac --grants <GRANTS>` command.
    pub fn cmd_with_grants(&self) -> assert_cmd::Command {
        let grants = self.grants();
        let mut cmd = self.cmd();
        cmd.arg("--grants").arg(grants);
        cmd
    }
}
