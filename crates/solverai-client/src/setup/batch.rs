use solverai_api::ResourceKind;

use super::pool;
use super::{
    BatchError, OperationFailure, ResourceIds, ResourceOperation, SetupClient, SetupError,
};
use crate::registry::ResourceRegistry;

/// Operations queued for one concurrent flush.
///
/// A batch is single use: [`Batch::flush`] consumes it. Operations of one batch run
/// independently and cannot see each other's results, so a problem referencing new modules
/// belongs in a second batch flushed after the first one.
#[must_use = "queued operations only run when the batch is flushed"]
pub struct Batch<'a, R> {
    client: &'a SetupClient<R>,
    operations: Vec<ResourceOperation>,
}

impl<'a, R: ResourceRegistry> Batch<'a, R> {
    pub(crate) fn new(client: &'a SetupClient<R>) -> Self {
        Self {
            client,
            operations: Vec::new(),
        }
    }

    /// Queue an operation and return its position in the batch.
    pub fn queue(&mut self, operation: impl Into<ResourceOperation>) -> Result<usize, SetupError> {
        let operation = operation.into();
        operation.validate()?;
        self.operations.push(operation);
        Ok(self.operations.len() - 1)
    }

    pub fn operations(&self) -> &[ResourceOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run every queued operation, on at most `max_concurrency` threads (one per operation when
    /// unset), and wait for all of them.
    ///
    /// On success the identifiers are grouped by kind in the order the operations were queued.
    /// If any operation fails, every resource created by this flush is deleted again (problems
    /// first) and a [`BatchError`] lists each failure with its kind, position and name.
    pub fn flush(self, max_concurrency: Option<usize>) -> Result<ResourceIds, SetupError> {
        let Batch { client, operations } = self;
        if operations.is_empty() {
            return Err(SetupError::Configuration(
                "batch not set up: no operation was queued".to_string(),
            ));
        }

        log::info!("Flushing a batch of {} operations", operations.len());
        let registry = client.registry();
        let outcomes = pool::run_indexed(operations, max_concurrency, |index, operation| {
            let result = operation.execute(registry);
            if let Err(error) = &result {
                log::warn!(
                    "Operation {index} ({} '{}') failed: {error}",
                    operation.kind(),
                    operation.display_name()
                );
            }
            (operation, result)
        });

        let mut ids = ResourceIds::new();
        let mut created = ResourceIds::new();
        let mut failures = Vec::new();
        for (index, (operation, result)) in outcomes.into_iter().enumerate() {
            match result {
                Ok(id) => {
                    if operation.is_create() {
                        created.push(operation.kind(), id.clone());
                    }
                    ids.push(operation.kind(), id);
                }
                Err(error) => failures.push(OperationFailure {
                    kind: operation.kind(),
                    index,
                    name: operation.display_name(),
                    error,
                }),
            }
        }

        if failures.is_empty() {
            return Ok(ids);
        }

        log::warn!(
            "{} of the batch operations failed, deleting the {} created resources",
            failures.len(),
            created.len()
        );
        let rollback = client.delete_all(&created).err();
        if let Some(rollback) = &rollback {
            log::error!("Rollback incomplete: {rollback}");
        }

        Err(BatchError {
            failures,
            rolled_back: created,
            rollback,
        }
        .into())
    }
}

impl<R> std::fmt::Debug for Batch<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ResourceKind> = self.operations.iter().map(|op| op.kind()).collect();
        f.debug_struct("Batch").field("operations", &kinds).finish()
    }
}
