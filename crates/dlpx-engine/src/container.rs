//! Self Service container repository

use dlpx_step_api::StepResult;
use serde_json::{
    json,
    Value,
};

use crate::client::EngineClient;
use crate::types::{
    Container,
    EngineAction,
};

const PATH_ROOT: &str = "/resources/json/delphix/jetstream/container";

/// Used for interacting with Self Service data containers.
pub struct ContainerRepository<'a> {
    engine: &'a EngineClient,
}

impl<'a> ContainerRepository<'a> {
    pub fn new(engine: &'a EngineClient) -> Self {
        Self { engine }
    }

    /// Lists the Self Service containers on the engine.
    pub async fn list(&self) -> StepResult<Vec<Container>> {
        let response = self.engine.get(PATH_ROOT).await?;
        Ok(serde_json::from_value(response.result)?)
    }

    /// Finds a container by name or reference.
    pub async fn find(&self, name_or_reference: &str) -> StepResult<Option<Container>> {
        let containers = self.list().await?;
        Ok(containers
            .into_iter()
            .find(|c| c.name == name_or_reference || c.reference == name_or_reference))
    }

    /// Refreshes a container from its source.
    pub async fn refresh(&self, reference: &str) -> StepResult<EngineAction> {
        let path = operation_path(reference, "refresh");
        let payload = force_payload("JSDataContainerRefreshParameters");
        let response = self.engine.post(&path, &payload).await?;
        Ok(response.into_action())
    }

    /// Resets a container to its last bookmark or refresh point.
    pub async fn reset(&self, reference: &str) -> StepResult<EngineAction> {
        let path = operation_path(reference, "reset");
        let payload = force_payload("JSDataContainerResetParameters");
        let response = self.engine.post(&path, &payload).await?;
        Ok(response.into_action())
    }

    /// Restores a container to a bookmark.
    pub async fn restore(
        &self, reference: &str, bookmark_reference: &str,
    ) -> StepResult<EngineAction> {
        let path = operation_path(reference, "restore");
        let response = self.engine.post(&path, &restore_payload(bookmark_reference)).await?;
        Ok(response.into_action())
    }
}

pub(crate) fn operation_path(reference: &str, operation: &str) -> String {
    format!("{PATH_ROOT}/{reference}/{operation}")
}

pub(crate) fn force_payload(kind: &str) -> Value {
    json!({
        "type": kind,
        "forceOption": false
    })
}

pub(crate) fn restore_payload(bookmark_reference: &str) -> Value {
    json!({
        "type": "JSDataContainerRestoreParameters",
        "timelinePointParameters": {
            "type": "JSTimelinePointBookmarkInput",
            "bookmark": bookmark_reference
        },
        "forceOption": false
    })
}
