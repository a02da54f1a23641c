//! VDB provisioning and deletion endpoints

use dlpx_step_api::StepResult;

use crate::client::DctClient;
use crate::types::{
    DeleteVdbParameters,
    DeleteVdbResponse,
    ProvisionVdbBySnapshotParameters,
    ProvisionVdbFromBookmarkParameters,
    ProvisionVdbResponse,
};

const PATH_PROVISION_FROM_BOOKMARK: &str = "/vdbs/provision_from_bookmark";
const PATH_PROVISION_BY_SNAPSHOT: &str = "/vdbs/provision_by_snapshot";

impl DctClient {
    /// Provisions a VDB from a Self Service bookmark.
    pub async fn provision_vdb_from_bookmark(
        &self, params: &ProvisionVdbFromBookmarkParameters,
    ) -> StepResult<ProvisionVdbResponse> {
        self.post_json(PATH_PROVISION_FROM_BOOKMARK, params).await
    }

    /// Provisions a VDB from a snapshot of a source dataset.
    pub async fn provision_vdb_by_snapshot(
        &self, params: &ProvisionVdbBySnapshotParameters,
    ) -> StepResult<ProvisionVdbResponse> {
        self.post_json(PATH_PROVISION_BY_SNAPSHOT, params).await
    }

    /// Deletes a VDB by id.
    pub async fn delete_vdb(&self, vdb_id: &str, force: bool) -> StepResult<DeleteVdbResponse> {
        let params = DeleteVdbParameters { force };
        self.post_json(&delete_path(vdb_id), &params).await
    }
}

pub(crate) fn delete_path(vdb_id: &str) -> String {
    format!("/vdbs/{vdb_id}/delete")
}
