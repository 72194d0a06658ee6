// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace holding a policy source
// and an output directory, plus an in-memory `Log` for library-level tests.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use browser_policy_gen::logging::{Log, TaskStatus};

/// Policy source used by most scenarios: chrome and edge, no brave.
pub const FIXTURE_POLICIES: &str = include_str!("../fixtures/policies.yaml");

/// An isolated workspace backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `policies.yaml` and `generated/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a workspace whose source is the shared fixture.
    pub fn new() -> Self {
        TestContextBuilder::new()
            .with_policies(FIXTURE_POLICIES)
            .build()
    }

    /// Workspace root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the policy source.
    pub fn input(&self) -> PathBuf {
        self.root.path().join("policies.yaml")
    }

    /// Output root the generator writes under.
    pub fn output(&self) -> PathBuf {
        self.root.path().join("generated")
    }

    /// Read a generated file relative to the output root.
    pub fn read_output(&self, relative: &str) -> String {
        std::fs::read_to_string(self.output().join(relative)).expect("read generated file")
    }

    /// Every file under the output root, relative and sorted, with `/`
    /// separators.
    pub fn generated_files(&self) -> Vec<String> {
        let root = self.output();
        let mut files = Vec::new();
        let Ok(platforms) = std::fs::read_dir(&root) else {
            return files;
        };
        for platform in platforms.flatten() {
            if !platform.path().is_dir() {
                continue;
            }
            for entry in std::fs::read_dir(platform.path()).expect("read platform dir").flatten() {
                files.push(format!(
                    "{}/{}",
                    platform.file_name().to_string_lossy(),
                    entry.file_name().to_string_lossy()
                ));
            }
        }
        files.sort();
        files
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building an empty workspace (no policy source yet).
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Write `content` as `policies.yaml`.
    pub fn with_policies(self, content: &str) -> Self {
        std::fs::write(self.ctx.input(), content).expect("write policies.yaml");
        self
    }

    /// Create a regular file where an output directory is expected, so
    /// writes beneath it fail.
    pub fn with_blocked_dir(self, relative: &str) -> Self {
        let path = self.ctx.output().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create output root");
        }
        std::fs::write(path, "").expect("write blocking file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// A [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct CaptureLog {
    messages: Mutex<Vec<(&'static str, String)>>,
    tasks: Mutex<Vec<(String, TaskStatus)>>,
}

impl CaptureLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.messages
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level` ("warn", "error", ...).
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded `(name, status)` pairs in order.
    pub fn tasks(&self) -> Vec<(String, TaskStatus)> {
        self.tasks.lock().expect("log lock").clone()
    }
}

impl Log for CaptureLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, _message: Option<&str>) {
        self.tasks
            .lock()
            .expect("log lock")
            .push((name.to_string(), status));
    }
}
