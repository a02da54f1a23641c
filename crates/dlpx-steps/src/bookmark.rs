//! Self Service bookmark build step

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use dlpx_engine::{
    BookmarkRepository,
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

/// Operations offered by the bookmark step dropdown. Update and Share
/// are listed for parity with the historical form but have no engine
/// call behind them; selecting one fails the step up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkOperation {
    #[default]
    Create,
    Update,
    Delete,
    Share,
}

impl BookmarkOperation {
    pub const ALL: [BookmarkOperation; 4] = [
        BookmarkOperation::Create,
        BookmarkOperation::Update,
        BookmarkOperation::Delete,
        BookmarkOperation::Share,
    ];

    fn ensure_defined(&self) -> StepResult<()> {
        match self {
            BookmarkOperation::Create | BookmarkOperation::Delete => Ok(()),
            other => Err(StepError::UndefinedOperation(format!(
                "Self Service Bookmark operation {other}"
            ))),
        }
    }
}

impl fmt::Display for BookmarkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookmarkOperation::Create => "Create",
            BookmarkOperation::Update => "Update",
            BookmarkOperation::Delete => "Delete",
            BookmarkOperation::Share => "Share",
        };
        f.write_str(name)
    }
}

impl FromStr for BookmarkOperation {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(BookmarkOperation::Create),
            "Update" => Ok(BookmarkOperation::Update),
            "Delete" => Ok(BookmarkOperation::Delete),
            "Share" => Ok(BookmarkOperation::Share),
            other => Err(StepError::UndefinedOperation(format!(
                "Self Service Bookmark operation {other}"
            ))),
        }
    }
}

/// Build step for managing a Self Service bookmark.
pub struct SelfServiceBookmarkStep {
    pub engine: String,
    pub bookmark: String,
    pub container: String,
    pub operation: BookmarkOperation,
    metadata: StepMetadata,
}

impl SelfServiceBookmarkStep {
    pub fn new(
        engine: impl Into<String>, bookmark: impl Into<String>, container: impl Into<String>,
        operation: BookmarkOperation,
    ) -> Self {
        let schema = ConfigSchema::new()
            .add_field(ConfigSchema::select("engine", "Engine", "Engine to target"))
            .add_field(ConfigSchema::select(
                "bookmark",
                "Bookmark",
                "Bookmark reference (Delete)",
            ))
            .add_field(ConfigSchema::select(
                "container",
                "Container",
                "Container whose active branch gets the bookmark (Create)",
            ))
            .add_field(ConfigSchema::select("operation", "Operation", "What to do"));

        let metadata = StepMetadata {
            name: "self-service-bookmark".to_string(),
            display_name: "Delphix - Self Service Bookmark".to_string(),
            description: "Create or delete a Self Service bookmark".to_string(),
            schema,
        };

        Self {
            engine: engine.into(),
            bookmark: bookmark.into(),
            container: container.into(),
            operation,
            metadata,
        }
    }

    fn validate(&self) -> StepResult<()> {
        self.operation.ensure_defined()?;
        match self.operation {
            BookmarkOperation::Create if self.container.is_empty() => Err(
                StepError::InvalidConfig("Create needs a container".to_string()),
            ),
            BookmarkOperation::Delete if self.bookmark.is_empty() => Err(
                StepError::InvalidConfig("Delete needs a bookmark reference".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for SelfServiceBookmarkStep {
    fn default() -> Self {
        Self::new("", "", "", BookmarkOperation::Create)
    }
}

#[async_trait]
impl BuildStep for SelfServiceBookmarkStep {
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

        let bookmarks = BookmarkRepository::new(&engine);
        let outcome = if self.operation == BookmarkOperation::Create {
            let containers = ContainerRepository::new(&engine);
            match containers.find(&self.container).await {
                Ok(Some(container)) => {
                    bookmarks
                        .create(
                            "Created by CI",
                            &container.active_branch,
                            &container.reference,
                        )
                        .await
                }
                Ok(None) => {
                    log.println(&format!("Unknown container: {}", self.container));
                    return Ok(());
                }
                Err(e) => Err(e),
            }
        } else {
            bookmarks.delete(&self.bookmark).await
        };

        let action = match outcome {
            Ok(action) => action,
            Err(e) => {
                // Engine failures are surfaced in the build log; the
                // step keeps the build going.
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
            "operation" => Ok(BookmarkOperation::ALL.iter().map(|o| o.to_string()).collect()),
            "bookmark" => {
                let engine = EngineClient::connect(ctx.engine(&self.engine)?).await?;
                let bookmarks = BookmarkRepository::new(&engine).list().await?;
                Ok(bookmarks.into_iter().map(|b| b.reference).collect())
            }
            "container" => {
                let engine = EngineClient::connect(ctx.engine(&self.engine)?).await?;
                let containers = ContainerRepository::new(&engine).list().await?;
                Ok(containers.into_iter().map(|c| c.name).collect())
            }
            _ => Ok(Vec::new()),
        }
    }
}
