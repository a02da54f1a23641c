//! Client for the DCT API
//!
//! The newer Delphix control-plane API: API-key authenticated, plain
//! JSON resources, asynchronous jobs tracked by id.
//!
//! - `client` - HTTP client core and auth header handling
//! - `vdbs` - VDB provisioning and deletion
//! - `jobs` - job lookup and polling
//! - `types` - request/response types

pub mod client;
pub mod jobs;
pub mod types;
pub mod vdbs;

pub use client::DctClient;
pub use types::{
    DeleteVdbParameters,
    DeleteVdbResponse,
    Job,
    JobStatus,
    ProvisionVdbBySnapshotParameters,
    ProvisionVdbFromBookmarkParameters,
    ProvisionVdbResponse,
};
