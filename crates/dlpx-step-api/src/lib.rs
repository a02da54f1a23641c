pub mod config;
pub mod context;
pub mod error;
pub mod log;
pub mod logging;
pub mod poll;
pub mod registry;
pub mod schema;
pub mod step;

pub use config::{
    DctConfig,
    EngineConfig,
    GlobalConfig,
};
pub use context::StepContext;
pub use error::{
    StepError,
    StepResult,
};
pub use log::{
    BufferLog,
    BuildLog,
    TracingLog,
};
pub use poll::{
    PollOutcome,
    PollPolicy,
};
pub use registry::StepRegistry;
pub use schema::{
    ConfigField,
    ConfigFieldType,
    ConfigSchema,
};
pub use step::{
    BuildStep,
    StepMetadata,
};
