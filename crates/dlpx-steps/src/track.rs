//! Shared action/job tracking for engine-backed steps

use dlpx_engine::{
    ActionState,
    ActionStatus,
    EngineAction,
    EngineClient,
    JobRepository,
};
use dlpx_step_api::{
    BuildLog,
    StepContext,
};

/// Reports an action that already ran to completion. Returns whether it
/// did, in which case there is no job left worth polling.
fn report_completed_action(status: &ActionStatus, log: &dyn BuildLog) -> bool {
    if status.state != ActionState::Completed {
        return false;
    }
    let title = status.title.as_deref().unwrap_or(&status.reference);
    log.println(&format!("{title}: {}", status.state));
    true
}

/// Follows up a state-changing engine call: reports the action if it
/// already completed, otherwise polls the returned job to a terminal
/// state. Remote failures along the way are printed, never raised.
pub(crate) async fn track_engine_action(
    engine: &EngineClient, action: &EngineAction, ctx: &StepContext, log: &dyn BuildLog,
) {
    let jobs = JobRepository::new(engine);

    if let Some(action_ref) = action.action.as_deref() {
        match jobs.action_status(action_ref).await {
            Ok(status) if report_completed_action(&status, log) => return,
            Ok(_) => {}
            Err(e) => log.println(&e.to_string()),
        }
    }

    let Some(job_ref) = action.job.as_deref() else {
        log.println("Engine did not return a job to track");
        return;
    };

    let mut cancel = ctx.cancel();
    let outcome = jobs.wait_for_job(job_ref, &mut cancel, log).await;
    if outcome.interrupted {
        log.println("Wait interrupted!");
    } else if let Some(status) = outcome.status {
        log.println(&format!("{job_ref} finished: {}", status.job_state));
    }
}

#[cfg(test)]
mod tests {
    use dlpx_step_api::BufferLog;

    use super::*;

    fn action(state: ActionState) -> ActionStatus {
        ActionStatus {
            reference: "ACTION-12".to_string(),
            title: Some("Create Bookmark".to_string()),
            state,
        }
    }

    #[test]
    fn test_completed_action_short_circuits() {
        let log = BufferLog::new();
        assert!(report_completed_action(&action(ActionState::Completed), &log));
        assert_eq!(log.lines(), vec!["Create Bookmark: COMPLETED"]);
    }

    #[test]
    fn test_in_flight_action_is_not_reported() {
        let log = BufferLog::new();
        assert!(!report_completed_action(&action(ActionState::Executing), &log));
        assert!(!report_completed_action(&action(ActionState::Failed), &log));
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_untitled_action_falls_back_to_reference() {
        let log = BufferLog::new();
        let status = ActionStatus {
            title: None,
            ..action(ActionState::Completed)
        };
        assert!(report_completed_action(&status, &log));
        assert_eq!(log.lines(), vec!["ACTION-12: COMPLETED"]);
    }
}
