//! Self Service container build step

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use dlpx_engine::{
    ContainerRepository,
    EngineClient,
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

use crate::track::track_engine_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerOperation {
    #[default]
    Refresh,
    Restore,
    Reset,
}

impl ContainerOperation {
    pub const ALL: [ContainerOperation; 3] = [
        ContainerOperation::Refresh,
        ContainerOperation::Restore,
        ContainerOperation::Reset,
    ];
}

impl fmt::Display for ContainerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerOperation::Refresh => "Refresh",
            ContainerOperation::Restore => "Restore",
            ContainerOperation::Reset => "Reset",
        };
        f.write_str(name)
    }
}

impl FromStr for ContainerOperation {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Refresh" => Ok(ContainerOperation::Refresh),
            "Restore" => Ok(ContainerOperation::Restore),
            "Reset" => Ok(ContainerOperation::Reset),
            other => Err(StepError::UndefinedOperation(format!(
                "Self Service Container operation {other}"
            ))),
        }
    }
}

/// Build step for operating a Self Service data container.
pub struct SelfServiceContainerStep {
    pub engine: String,
    pub container: String,
    /// Bookmark reference; only used by Restore.
    pub bookmark: String,
    pub operation: ContainerOperation,
    metadata: StepMetadata,
}

impl SelfServiceContainerStep {
    pub fn new(
        engine: impl Into<String>, container: impl Into<String>, bookmark: impl Into<String>,
        operation: ContainerOperation,
    ) -> Self {
        let schema = ConfigSchema::new()
            .add_field(ConfigSchema::select("engine", "Engine", "Engine to target"))
            .add_field(ConfigSchema::select(
                "container",
                "Container",
                "Container to operate on",
            ))
            .add_field(ConfigSchema::select(
                "bookmark",
                "Bookmark",
                "Bookmark to restore to (Restore only)",
            ))
            .add_field(ConfigSchema::select("operation", "Operation", "What to do"));

        let metadata = StepMetadata {
            name: "self-service-container".to_string(),
            display_name: "Delphix - Self Service Container".to_string(),
            description: "Refresh, restore, or reset a Self Service container".to_string(),
            schema,
        };

        Self {
            engine: engine.into(),
            container: container.into(),
            bookmark: bookmark.into(),
            operation,
            metadata,
        }
    }

    fn validate(&self) -> StepResult<()> {
        if self.container.is_empty() {
            return Err(StepError::InvalidConfig(
                "Container step needs a container".to_string(),
            ));
        }
        if self.operation == ContainerOperation::Restore && self.bookmark.is_empty() {
            return Err(StepError::InvalidConfig(
                "Restore needs a bookmark reference".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SelfServiceContainerStep {
    fn default() -> Self {
        Self::new("", "", "", ContainerOperation::Refresh)
    }
}

#[async_trait]
impl BuildStep for SelfServiceContainerStep {
    fn metadata(&self) -> &StepMetadata {
        &self.metadata
    }

    async fn perform(&self, ctx: &StepContext, log: &dyn BuildLog) -> StepResult<()> {
        self.validate()?;
        let config = ctx.engine(&self.engine)?;

        let engine = match EngineClient::connect(config).await {
            Ok(engine) => engine,
            Err(e) => {
                log.println(&format!("Unable to connect to engine {}: {e}", self.engine));
                return Ok(());
            }
        };

        let containers = ContainerRepository::new(&engine);
        let container = match containers.find(&self.container).await {
            Ok(Some(container)) => container,
            Ok(None) => {
                log.println(&format!("Unknown container: {}", self.container));
                return Ok(());
            }
            Err(e) => {
                log.println(&e.to_string());
                return Ok(());
            }
        };

        let outcome = match self.operation {
            ContainerOperation::Refresh => containers.refresh(&container.reference).await,
            ContainerOperation::Restore => {
                containers.restore(&container.reference, &self.bookmark).await
            }
            ContainerOperation::Reset => containers.reset(&container.reference).await,
        };

        let action = match outcome {
            Ok(action) => action,
            Err(e) => {
                log.println(&e.to_string());
                return Ok(());
            }
        };

        track_engine_action(&engine, &action, ctx, log).await;
        Ok(())
    }

    async fn field_options(&self, field: &str, ctx: &StepContext) -> StepResult<Vec<String>> {
        match field {
            "engine" => Ok(ctx.config().engine_names()),
            "operation" => Ok(ContainerOperation::ALL.iter().map(|o| o.to_string()).collect()),
            "container" => {
                let engine = EngineClient::connect(ctx.engine(&self.engine)?).await?;
                let containers = ContainerRepository::new(&engine).list().await?;
                Ok(containers.into_iter().map(|c| c.name).collect())
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use dlpx_step_api::{
        BufferLog,
        GlobalConfig,
    };

    use super::*;

    #[test]
    fn test_operation_round_trip() {
        for op in ContainerOperation::ALL {
            assert_eq!(op.to_string().parse::<ContainerOperation>().unwrap(), op);
        }
        assert!("Enable".parse::<ContainerOperation>().is_err());
    }

    #[tokio::test]
    async fn test_restore_without_bookmark_is_config_error() {
        let ctx = StepContext::new(GlobalConfig::default());
        let log = BufferLog::new();
        let step =
            SelfServiceContainerStep::new("prod", "dev-copy", "", ContainerOperation::Restore);

        let err = step.perform(&ctx, &log).await.unwrap_err();
        assert!(matches!(err, StepError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_missing_container_is_config_error() {
        let ctx = StepContext::new(GlobalConfig::default());
        let log = BufferLog::new();
        let step = SelfServiceContainerStep::new("prod", "", "", ContainerOperation::Refresh);

        let err = step.perform(&ctx, &log).await.unwrap_err();
        assert!(matches!(err, StepError::InvalidConfig(_)));
    }
}
