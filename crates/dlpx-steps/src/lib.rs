//! Build-step entry points for driving a Delphix engine from CI
//!
//! Each step is a `BuildStep` implementation that sequences repository
//! calls against the legacy engine API or the DCT API and surfaces
//! progress and errors on the build log:
//! - `bookmark` - Self Service bookmark create/delete
//! - `container` - Self Service container refresh/restore/reset
//! - `vdb` - VDB provision/delete over DCT
//!
//! Remote failures are printed and the build keeps going; configuration
//! mistakes and undefined operations fail the step.

mod bookmark;
mod container;
mod track;
mod vdb;

pub use bookmark::{
    BookmarkOperation,
    SelfServiceBookmarkStep,
};
pub use container::{
    ContainerOperation,
    SelfServiceContainerStep,
};
use dlpx_step_api::StepRegistry;
pub use vdb::{
    DeleteVdbStep,
    ProvisionSource,
    ProvisionVdbStep,
};

/// Registers every step this crate ships.
pub fn register_steps(registry: &mut StepRegistry) {
    registry.register(Box::new(SelfServiceBookmarkStep::default()));
    registry.register(Box::new(SelfServiceContainerStep::default()));
    registry.register(Box::new(ProvisionVdbStep::default()));
    registry.register(Box::new(DeleteVdbStep::default()));
}

/// One-time process setup: tracing and the rustls crypto provider.
pub fn init() {
    dlpx_step_api::logging::init();
    dlpx_step_api::logging::init_tls();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_steps() {
        let mut registry = StepRegistry::new();
        register_steps(&mut registry);

        assert_eq!(registry.count(), 4);
        assert_eq!(
            registry.names(),
            vec![
                "delete-vdb",
                "provision-vdb",
                "self-service-bookmark",
                "self-service-container"
            ]
        );
        assert!(registry.get("self-service-bookmark").is_some());

        let display: Vec<&str> = registry
            .metadata()
            .iter()
            .map(|m| m.display_name.as_str())
            .collect();
        assert_eq!(
            display,
            vec![
                "Delphix - Delete VDB",
                "Delphix - Provision VDB",
                "Delphix - Self Service Bookmark",
                "Delphix - Self Service Container"
            ]
        );
    }
}
