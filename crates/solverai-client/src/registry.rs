use solverai_api::schemas::{Attachment, Fields, ResourceSummarySchema};
use solverai_api::{ClientError, DataManagerClient, ResourceId, ResourceKind};

/// Remote store of problem resources.
///
/// Implementations must be shareable across threads: batches and bulk deletions call them
/// from a pool of workers.
pub trait ResourceRegistry: Send + Sync {
    fn create(
        &self,
        kind: ResourceKind,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError>;

    fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError>;

    fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<(), ClientError>;

    /// Resources of `kind`, newest first.
    fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceSummarySchema>, ClientError>;

    fn get_one(&self, kind: ResourceKind, id: &ResourceId)
    -> Result<serde_json::Value, ClientError>;
}

impl ResourceRegistry for DataManagerClient {
    fn create(
        &self,
        kind: ResourceKind,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError> {
        DataManagerClient::create(self, kind, fields, attachment)
    }

    fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError> {
        DataManagerClient::update(self, kind, id, fields, attachment)
    }

    fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<(), ClientError> {
        DataManagerClient::delete(self, kind, id)
    }

    fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceSummarySchema>, ClientError> {
        DataManagerClient::list(self, kind)
    }

    fn get_one(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<serde_json::Value, ClientError> {
        DataManagerClient::get_one(self, kind, id)
    }
}
