//! API request/response types for the DCT API

use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Parameters for provisioning a VDB from a Self Service bookmark.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionVdbFromBookmarkParameters {
    pub bookmark_id: String,
    pub auto_select_repository: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Parameters for provisioning a VDB from a snapshot. When
/// `snapshot_id` is absent the engine picks the latest snapshot of the
/// source dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionVdbBySnapshotParameters {
    pub source_data_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    pub auto_select_repository: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteVdbParameters {
    pub force: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionVdbResponse {
    #[serde(default)]
    pub vdb_id: Option<String>,
    #[serde(default)]
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteVdbResponse {
    #[serde(default)]
    pub job: Option<Job>,
}

/// A DCT job resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub error_details: Option<String>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

/// DCT job status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Pending,
    Started,
    Timedout,
    Running,
    Canceled,
    Failed,
    Suspended,
    Abandoned,
    Completed,
}

impl JobStatus {
    /// Polling stops once the job leaves its in-flight states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending | JobStatus::Started | JobStatus::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Started => "STARTED",
            JobStatus::Timedout => "TIMEDOUT",
            JobStatus::Running => "RUNNING",
            JobStatus::Canceled => "CANCELED",
            JobStatus::Failed => "FAILED",
            JobStatus::Suspended => "SUSPENDED",
            JobStatus::Abandoned => "ABANDONED",
            JobStatus::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provision_from_bookmark_payload() {
        let params = ProvisionVdbFromBookmarkParameters {
            bookmark_id: "bmk-123".to_string(),
            auto_select_repository: true,
            target_group_id: None,
            name: Some("ci-vdb".to_string()),
        };

        let payload = serde_json::to_value(&params).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "bookmark_id": "bmk-123",
                "auto_select_repository": true,
                "name": "ci-vdb"
            })
        );
    }

    #[test]
    fn test_provision_by_snapshot_payload_omits_missing_snapshot() {
        let params = ProvisionVdbBySnapshotParameters {
            source_data_id: "src-9".to_string(),
            snapshot_id: None,
            auto_select_repository: true,
            target_group_id: Some("grp-1".to_string()),
            name: None,
        };

        let payload = serde_json::to_value(&params).unwrap();
        assert!(payload.get("snapshot_id").is_none());
        assert_eq!(payload["source_data_id"], "src-9");
        assert_eq!(payload["target_group_id"], "grp-1");
    }

    #[test]
    fn test_job_parse() {
        let job: Job = serde_json::from_str(
            r#"{
                "id": "abc-123",
                "status": "STARTED",
                "update_time": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(job.id, "abc-123");
        assert_eq!(job.status, JobStatus::Started);
        assert!(job.error_details.is_none());
        assert!(job.update_time.is_some());
    }

    #[test]
    fn test_job_status_terminality() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Started.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Canceled.is_terminal());
        assert!(JobStatus::Timedout.is_terminal());
        assert!(JobStatus::Abandoned.is_terminal());
        assert!(JobStatus::Suspended.is_terminal());
    }
}
