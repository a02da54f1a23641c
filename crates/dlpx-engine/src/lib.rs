//! Client for the legacy Delphix Engine JSON API
//!
//! The crate is organized into a thin HTTP client plus one repository
//! per resource family:
//! - `client` - session handshake, GET/POST, envelope handling
//! - `bookmark` - Self Service bookmarks
//! - `container` - Self Service data containers
//! - `job` - job/action status lookup and polling
//! - `types` - API response types

pub mod bookmark;
pub mod client;
pub mod container;
pub mod job;
pub mod types;

pub use bookmark::BookmarkRepository;
pub use client::{
    EngineClient,
    EngineResponse,
};
pub use container::ContainerRepository;
pub use job::JobRepository;
pub use types::{
    ActionState,
    ActionStatus,
    Bookmark,
    Container,
    EngineAction,
    JobState,
    JobStatus,
};
