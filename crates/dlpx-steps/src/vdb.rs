//! VDB provisioning and deletion build steps (DCT API)

use async_trait::async_trait;
use dlpx_dct::{
    DctClient,
    Job,
    JobStatus,
    ProvisionVdbBySnapshotParameters,
    ProvisionVdbFromBookmarkParameters,
};
use dlpx_step_api::{
    BuildLog,
    BuildStep,
    ConfigSchema,
    StepContext,
    StepError,
    StepMetadata,
    StepResult,
};

/// Where a provisioned VDB gets its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionSource {
    FromBookmark { bookmark_id: String },
    BySnapshot {
        source_data_id: String,
        /// Latest snapshot of the source when absent.
        snapshot_id: Option<String>,
    },
}

impl Default for ProvisionSource {
    fn default() -> Self {
        ProvisionSource::FromBookmark {
            bookmark_id: String::new(),
        }
    }
}

/// Build step that provisions a VDB through DCT and waits for the job.
pub struct ProvisionVdbStep {
    pub source: ProvisionSource,
    pub name: Option<String>,
    pub target_group_id: Option<String>,
    metadata: StepMetadata,
}

impl Default for ProvisionVdbStep {
    fn default() -> Self {
        let schema = ConfigSchema::new()
            .add_field(ConfigSchema::text("bookmark_id", "Bookmark ID", "Source bookmark"))
            .add_field(ConfigSchema::text(
                "source_data_id",
                "Source Dataset ID",
                "Source dataset (snapshot provisioning)",
            ))
            .add_field(ConfigSchema::text("name", "VDB Name", "Name for the new VDB"));

        Self {
            source: ProvisionSource::default(),
            name: None,
            target_group_id: None,
            metadata: StepMetadata {
                name: "provision-vdb".to_string(),
                display_name: "Delphix - Provision VDB".to_string(),
                description: "Provision a VDB from a bookmark or snapshot via DCT".to_string(),
                schema,
            },
        }
    }
}

impl ProvisionVdbStep {
    pub fn from_bookmark(bookmark_id: impl Into<String>) -> Self {
        Self {
            source: ProvisionSource::FromBookmark {
                bookmark_id: bookmark_id.into(),
            },
            ..Self::default()
        }
    }

    pub fn by_snapshot(
        source_data_id: impl Into<String>, snapshot_id: Option<String>,
    ) -> Self {
        Self {
            source: ProvisionSource::BySnapshot {
                source_data_id: source_data_id.into(),
                snapshot_id,
            },
            ..Self::default()
        }
    }

    fn validate(&self) -> StepResult<()> {
        match &self.source {
            ProvisionSource::FromBookmark { bookmark_id } if bookmark_id.is_empty() => Err(
                StepError::InvalidConfig("Provision needs a bookmark id".to_string()),
            ),
            ProvisionSource::BySnapshot { source_data_id, .. } if source_data_id.is_empty() => {
                Err(StepError::InvalidConfig(
                    "Provision needs a source dataset id".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl BuildStep for ProvisionVdbStep {
    fn metadata(&self) -> &StepMetadata {
        &self.metadata
    }

    async fn perform(&self, ctx: &StepContext, log: &dyn BuildLog) -> StepResult<()> {
        self.validate()?;
        let client = DctClient::new(ctx.dct()?)?;

        let response = match &self.source {
            ProvisionSource::FromBookmark { bookmark_id } => {
                let params = ProvisionVdbFromBookmarkParameters {
                    bookmark_id: bookmark_id.clone(),
                    auto_select_repository: true,
                    target_group_id: self.target_group_id.clone(),
                    name: self.name.clone(),
                };
                client.provision_vdb_from_bookmark(&params).await
            }
            ProvisionSource::BySnapshot {
                source_data_id,
                snapshot_id,
            } => {
                let params = ProvisionVdbBySnapshotParameters {
                    source_data_id: source_data_id.clone(),
                    snapshot_id: snapshot_id.clone(),
                    auto_select_repository: true,
                    target_group_id: self.target_group_id.clone(),
                    name: self.name.clone(),
                };
                client.provision_vdb_by_snapshot(&params).await
            }
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log.println(&e.to_string());
                return Ok(());
            }
        };

        if let Some(vdb_id) = response.vdb_id.as_deref() {
            log.println(&format!("Provision requested, VDB id: {vdb_id}"));
        }
        track_dct_job(&client, response.job.as_ref(), ctx, log).await;
        Ok(())
    }
}

/// Build step that deletes a VDB through DCT and waits for the job.
pub struct DeleteVdbStep {
    pub vdb_id: String,
    pub force: bool,
    metadata: StepMetadata,
}

impl DeleteVdbStep {
    pub fn new(vdb_id: impl Into<String>, force: bool) -> Self {
        Self {
            vdb_id: vdb_id.into(),
            force,
            metadata: StepMetadata {
                name: "delete-vdb".to_string(),
                display_name: "Delphix - Delete VDB".to_string(),
                description: "Delete a VDB via DCT".to_string(),
                schema: ConfigSchema::new()
                    .add_field(ConfigSchema::text("vdb_id", "VDB ID", "VDB to delete")),
            },
        }
    }
}

impl Default for DeleteVdbStep {
    fn default() -> Self {
        Self::new("", false)
    }
}

#[async_trait]
impl BuildStep for DeleteVdbStep {
    fn metadata(&self) -> &StepMetadata {
        &self.metadata
    }

    async fn perform(&self, ctx: &StepContext, log: &dyn BuildLog) -> StepResult<()> {
        if self.vdb_id.is_empty() {
            return Err(StepError::InvalidConfig("Delete needs a VDB id".to_string()));
        }
        let client = DctClient::new(ctx.dct()?)?;

        let response = match client.delete_vdb(&self.vdb_id, self.force).await {
            Ok(response) => response,
            Err(e) => {
                log.println(&e.to_string());
                return Ok(());
            }
        };

        log.println(&format!("Delete requested for VDB {}", self.vdb_id));
        track_dct_job(&client, response.job.as_ref(), ctx, log).await;
        Ok(())
    }
}

/// Polls a DCT job to completion, reporting the outcome. A FAILED end
/// state is reported with its details but does not fail the step.
async fn track_dct_job(
    client: &DctClient, job: Option<&Job>, ctx: &StepContext, log: &dyn BuildLog,
) {
    let Some(job) = job else {
        log.println("DCT did not return a job to track");
        return;
    };

    let mut cancel = ctx.cancel();
    let outcome = client.wait_for_job(&job.id, &mut cancel, log).await;
    if outcome.interrupted {
        log.println("Wait interrupted!");
        return;
    }

    if let Some(finished) = outcome.status {
        if finished.status == JobStatus::Failed {
            let details = finished.error_details.as_deref().unwrap_or("no details");
            log.println(&format!("Job {} failed: {details}", finished.id));
        } else {
            log.println(&format!("Job {} finished: {}", finished.id, finished.status));
        }
    }
}
