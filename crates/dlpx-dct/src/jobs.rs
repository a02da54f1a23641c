//! DCT job lookup and polling

use dlpx_step_api::{
    BuildLog,
    PollOutcome,
    PollPolicy,
    StepResult,
};
use tokio::sync::watch;

use crate::client::DctClient;
use crate::types::Job;

impl DctClient {
    /// Fetches a job by id.
    pub async fn get_job(&self, job_id: &str) -> StepResult<Job> {
        self.get_json(&job_path(job_id)).await
    }

    /// Polls the job every 20 seconds until it leaves its in-flight
    /// states, printing each observed status to the build log. Fetch
    /// failures are printed and polling continues; cancellation hands
    /// back the last observed job.
    pub async fn wait_for_job(
        &self, job_id: &str, cancel: &mut watch::Receiver<bool>, log: &dyn BuildLog,
    ) -> PollOutcome<Job> {
        PollPolicy::dct()
            .poll_until(
                cancel,
                move || async move {
                    match self.get_job(job_id).await {
                        Ok(job) => Some(job),
                        Err(e) => {
                            log.println(&e.to_string());
                            None
                        }
                    }
                },
                |job| job.status.is_terminal(),
                |job| log.println(&format!("Current job status: {}", job.status)),
            )
            .await
    }
}

pub(crate) fn job_path(job_id: &str) -> String {
    format!("/jobs/{job_id}")
}
