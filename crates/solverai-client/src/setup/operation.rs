use solverai_api::schemas::{Attachment, Fields};
use solverai_api::{Blob, ClientError, ResourceId, ResourceKind};

use crate::registry::ResourceRegistry;
use crate::setup::SetupError;

/// A create or update request for one resource.
///
/// The operation owns its fields, so a queued operation is not affected by anything the
/// caller does after queuing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceOperation {
    kind: ResourceKind,
    fields: Fields,
    attachment: Option<Attachment>,
    target: Option<ResourceId>,
}

impl ResourceOperation {
    pub fn create(kind: ResourceKind, fields: Fields) -> Self {
        Self {
            kind,
            fields,
            attachment: None,
            target: None,
        }
    }

    pub fn update(kind: ResourceKind, id: ResourceId, fields: Fields) -> Self {
        Self {
            kind,
            fields,
            attachment: None,
            target: Some(id),
        }
    }

    /// Send `blob` as the multipart part named `field`.
    pub fn with_attachment(mut self, field: impl Into<String>, blob: impl Into<Blob>) -> Self {
        self.attachment = Some(Attachment::new(field, blob));
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// The resource being updated, `None` for a create.
    pub fn target(&self) -> Option<&ResourceId> {
        self.target.as_ref()
    }

    pub fn is_create(&self) -> bool {
        self.target.is_none()
    }

    /// Name used in error reports: the `name` field, or the target id of an update without one.
    pub fn display_name(&self) -> String {
        match (self.fields.get("name").and_then(|n| n.as_str()), &self.target) {
            (Some(name), _) => name.to_string(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => String::new(),
        }
    }

    /// Reject operations that cannot be sent, before any request is made.
    pub(crate) fn validate(&self) -> Result<(), SetupError> {
        if let Some(attachment) = &self.attachment {
            if attachment.field.is_empty() {
                return Err(SetupError::Configuration(format!(
                    "{} attachment has no field name",
                    self.kind
                )));
            }
            if let Blob::Path(path) = &attachment.blob {
                if path.as_os_str().is_empty() {
                    return Err(SetupError::Configuration(format!(
                        "{} attachment '{}' has an empty path",
                        self.kind, attachment.field
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn execute<R>(&self, registry: &R) -> Result<ResourceId, ClientError>
    where
        R: ResourceRegistry + ?Sized,
    {
        let attachment = self.attachment.as_ref();
        match &self.target {
            None => registry.create(self.kind, &self.fields, attachment),
            Some(id) => registry.update(self.kind, id, &self.fields, attachment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_attachment_path_is_a_configuration_error() {
        let op = ResourceOperation::create(ResourceKind::Code, Fields::new())
            .with_attachment("code", "");
        assert!(op.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn updates_without_name_are_reported_by_id() {
        let op =
            ResourceOperation::update(ResourceKind::Equation, ResourceId::Int(3), Fields::new());
        assert_eq!(op.display_name(), "#3");

        let mut fields = Fields::new();
        fields.insert("name".into(), json!("eq"));
        let op = ResourceOperation::update(ResourceKind::Equation, ResourceId::Int(3), fields);
        assert_eq!(op.display_name(), "eq");
    }
}
