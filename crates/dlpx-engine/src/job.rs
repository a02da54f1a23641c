//! Engine job/action status lookup and polling

use dlpx_step_api::{
    BuildLog,
    PollOutcome,
    PollPolicy,
    StepResult,
};
use tokio::sync::watch;

use crate::client::EngineClient;
use crate::types::{
    ActionStatus,
    JobStatus,
};

const PATH_JOB: &str = "/resources/json/delphix/job";
const PATH_ACTION: &str = "/resources/json/delphix/action";

/// Used for tracking engine jobs and actions.
pub struct JobRepository<'a> {
    engine: &'a EngineClient,
}

impl<'a> JobRepository<'a> {
    pub fn new(engine: &'a EngineClient) -> Self {
        Self { engine }
    }

    /// Fetches the current status of a job.
    pub async fn job_status(&self, job_reference: &str) -> StepResult<JobStatus> {
        let response = self.engine.get(&job_path(job_reference)).await?;
        Ok(serde_json::from_value(response.result)?)
    }

    /// Fetches the current status of an action.
    pub async fn action_status(&self, action_reference: &str) -> StepResult<ActionStatus> {
        let response = self.engine.get(&action_path(action_reference)).await?;
        Ok(serde_json::from_value(response.result)?)
    }

    /// Polls the job every second until it leaves RUNNING, printing the
    /// summary to the build log whenever it changes. Fetch failures are
    /// printed and polling continues; cancellation hands back the last
    /// observed status.
    pub async fn wait_for_job(
        &self, job_reference: &str, cancel: &mut watch::Receiver<bool>, log: &dyn BuildLog,
    ) -> PollOutcome<JobStatus> {
        PollPolicy::engine()
            .poll_until(
                cancel,
                move || async move {
                    match self.job_status(job_reference).await {
                        Ok(status) => Some(status),
                        Err(e) => {
                            log.println(&e.to_string());
                            None
                        }
                    }
                },
                |status| status.job_state.is_terminal(),
                summary_observer(log),
            )
            .await
    }
}

/// Observation callback that prints the job summary to the build log,
/// skipping repeats so an unchanged job does not flood the console.
pub(crate) fn summary_observer(log: &dyn BuildLog) -> impl FnMut(&JobStatus) + '_ {
    let mut last: Option<String> = None;
    move |status| {
        let summary = status.summary();
        if last.as_deref() != Some(summary.as_str()) {
            log.println(&summary);
            last = Some(summary);
        }
    }
}

pub(crate) fn job_path(reference: &str) -> String {
    format!("{PATH_JOB}/{reference}")
}

pub(crate) fn action_path(reference: &str) -> String {
    format!("{PATH_ACTION}/{reference}")
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use dlpx_step_api::BufferLog;

    use super::*;
    use crate::types::JobState;

    #[test]
    fn test_status_paths() {
        assert_eq!(job_path("JOB-42"), "/resources/json/delphix/job/JOB-42");
        assert_eq!(
            action_path("ACTION-8"),
            "/resources/json/delphix/action/ACTION-8"
        );
    }

    fn running(percent: f64) -> JobStatus {
        JobStatus {
            reference: "JOB-1".to_string(),
            job_state: JobState::Running,
            percent_complete: percent,
            title: Some("DB_REFRESH".to_string()),
        }
    }

    #[tokio::test]
    async fn test_summary_printed_only_on_change() {
        let statuses = vec![
            running(10.0),
            running(10.0),
            running(50.0),
            JobStatus {
                job_state: JobState::Completed,
                ..running(100.0)
            },
        ];
        let log = BufferLog::new();
        let (_tx, mut rx) = watch::channel(false);
        let index = Cell::new(0usize);

        let statuses = &statuses;
        let index = &index;
        let outcome = PollPolicy::new(Duration::from_millis(5))
            .poll_until(
                &mut rx,
                move || async move {
                    let status = statuses[index.get()].clone();
                    index.set(index.get() + 1);
                    Some(status)
                },
                |status| status.job_state.is_terminal(),
                summary_observer(&log),
            )
            .await;

        assert!(!outcome.interrupted);
        assert_eq!(
            log.lines(),
            vec![
                "DB_REFRESH - RUNNING (10%)",
                "DB_REFRESH - RUNNING (50%)",
                "DB_REFRESH - COMPLETED (100%)",
            ]
        );
    }
}
