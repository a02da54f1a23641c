use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::context::StepContext;
use crate::error::StepResult;
use crate::log::BuildLog;
use crate::schema::ConfigSchema;

/// Step metadata - describes the build step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetadata {
    /// Step identifier (e.g., "self-service-bookmark")
    pub name: String,
    /// Name to display for the build step
    pub display_name: String,
    /// Step description
    pub description: String,
    /// Parameter schema for form generation
    pub schema: ConfigSchema,
}

/// Main step trait - every build step entry point implements this
#[async_trait]
pub trait BuildStep: Send + Sync {
    /// Get step metadata
    fn metadata(&self) -> &StepMetadata;

    /// Run the step against the configured engines.
    ///
    /// Remote failures are written to `log` and the step generally
    /// continues past them; configuration problems and undefined
    /// operations fail the step.
    async fn perform(&self, ctx: &StepContext, log: &dyn BuildLog) -> StepResult<()>;

    /// Dropdown options for a schema field, fetched live where the
    /// field refers to remote resources.
    async fn field_options(&self, _field: &str, _ctx: &StepContext) -> StepResult<Vec<String>> {
        Ok(Vec::new())
    }

    /// Get the step name string
    fn name(&self) -> &str {
        &self.metadata().name
    }
}
