//! API response types for the legacy engine API
//!
//! Everything here is a read-only value object reconstructed from each
//! response; nothing is cached or mutated locally. Picking up a state
//! change always means re-fetching the resource.

use std::fmt;

use serde::Deserialize;

/// Action/job references returned by a state-changing engine call.
#[derive(Debug, Clone, Default)]
pub struct EngineAction {
    pub action: Option<String>,
    pub job: Option<String>,
}

/// Lifecycle state of an engine job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    Running,
    Suspended,
    Canceled,
    Completed,
    Failed,
}

impl JobState {
    /// Polling stops as soon as the job leaves RUNNING.
    pub fn is_terminal(&self) -> bool {
        *self != JobState::Running
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Running => "RUNNING",
            JobState::Suspended => "SUSPENDED",
            JobState::Canceled => "CANCELED",
            JobState::Completed => "COMPLETED",
            JobState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Snapshot of an engine job resource.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    pub reference: String,
    #[serde(rename = "jobState")]
    pub job_state: JobState,
    #[serde(rename = "percentComplete")]
    #[serde(default)]
    pub percent_complete: f64,
    #[serde(default)]
    pub title: Option<String>,
}

impl JobStatus {
    /// Human-readable one-liner printed to the build log when it changes.
    pub fn summary(&self) -> String {
        let subject = self.title.as_deref().unwrap_or(&self.reference);
        format!(
            "{subject} - {} ({:.0}%)",
            self.job_state, self.percent_complete
        )
    }
}

/// Lifecycle state of an engine action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionState {
    Executing,
    Waiting,
    Completed,
    Failed,
    Canceled,
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionState::Executing => "EXECUTING",
            ActionState::Waiting => "WAITING",
            ActionState::Completed => "COMPLETED",
            ActionState::Failed => "FAILED",
            ActionState::Canceled => "CANCELED",
        };
        f.write_str(name)
    }
}

/// Snapshot of an engine action resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionStatus {
    pub reference: String,
    #[serde(default)]
    pub title: Option<String>,
    pub state: ActionState,
}

/// A Self Service bookmark: a saved point-in-time reference on a branch.
#[derive(Debug, Clone, Deserialize)]
pub struct Bookmark {
    pub reference: String,
    pub name: String,
    pub branch: String,
    #[serde(default)]
    pub container: Option<String>,
}

/// A Self Service data container.
#[derive(Debug, Clone, Deserialize)]
pub struct Container {
    pub reference: String,
    pub name: String,
    #[serde(rename = "activeBranch")]
    pub active_branch: String,
}
