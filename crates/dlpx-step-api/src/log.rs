//! Build log sink shared by all steps
//!
//! Steps report progress and non-fatal errors as plain lines, the same
//! stream a CI build console shows. Clients receive a `&dyn BuildLog`
//! so polling loops can surface status changes without caring where
//! the lines end up.

use std::sync::Mutex;

/// Destination for build-visible output lines.
pub trait BuildLog: Send + Sync {
    fn println(&self, line: &str);
}

/// Forwards build output to the `tracing` pipeline.
#[derive(Debug, Default)]
pub struct TracingLog;

impl BuildLog for TracingLog {
    fn println(&self, line: &str) {
        tracing::info!(target: "dlpx::build", "{line}");
    }
}

/// Collects build output in memory; used by tests and callers that
/// want to attach the log to their own reporting.
#[derive(Debug, Default)]
pub struct BufferLog {
    lines: Mutex<Vec<String>>,
}

impl BufferLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl BuildLog for BufferLog {
    fn println(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}
