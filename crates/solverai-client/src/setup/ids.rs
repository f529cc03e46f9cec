use std::collections::BTreeMap;

use solverai_api::{ResourceId, ResourceKind};

/// Identifiers grouped by resource kind, each group in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceIds {
    by_kind: BTreeMap<ResourceKind, Vec<ResourceId>>,
}

impl ResourceIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ResourceKind, id: ResourceId) {
        self.by_kind.entry(kind).or_default().push(id);
    }

    pub fn with(mut self, kind: ResourceKind, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        for id in ids {
            self.push(kind, id);
        }
        self
    }

    pub fn get(&self, kind: ResourceKind) -> &[ResourceId] {
        self.by_kind
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first problem id, if any.
    pub fn problem_id(&self) -> Option<&ResourceId> {
        self.get(ResourceKind::Problem).first()
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourceId)> {
        self.by_kind
            .iter()
            .flat_map(|(kind, ids)| ids.iter().map(move |id| (*kind, id)))
    }
}
