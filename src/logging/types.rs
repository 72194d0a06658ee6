//! Core logging types: output entries, status, and the [`Log`] trait.

/// Result of one generated output, kept for the run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Output name, e.g. `chrome/registry`.
    pub name: String,
    /// Final status of the output.
    pub status: TaskStatus,
    /// Optional detail message (the written path, skip reason or error).
    pub message: Option<String>,
}

/// Status of a completed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Output was written.
    Ok,
    /// Browser was skipped because it has no policies or no metadata.
    Skipped,
    /// Output was transcoded in dry-run mode; nothing was written.
    DryRun,
    /// Output could not be transcoded or written.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`; tests supply
/// their own implementation to capture messages.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an output result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_equality() {
        assert_eq!(TaskStatus::Ok, TaskStatus::Ok);
        assert_ne!(TaskStatus::Ok, TaskStatus::Failed);
        assert_ne!(TaskStatus::Skipped, TaskStatus::DryRun);
    }
}
