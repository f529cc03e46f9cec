//! Creating, updating, looking up and deleting problem resources.
//!
//! [`SetupClient::submit`] sends one operation and returns its identifier right away.
//! [`SetupClient::batch`] opens a [`Batch`] that queues operations and runs them concurrently
//! on [`Batch::flush`], deleting what it created if any of them fails.

mod batch;
mod error;
mod ids;
mod operation;
mod pool;
mod requests;


pub use batch::Batch;
pub use error::{BatchError, DeleteError, DeleteFailure, OperationFailure, SetupError};
pub use ids::ResourceIds;
pub use operation::ResourceOperation;
pub use requests::{
    CodePatch, EquationPatch, HardDataPatch, NewCode, NewEquation, NewHardData, NewProblem,
    NewSoftData, ProblemPatch, SoftDataPatch,
};

use regex::Regex;
use serde_json::Value;
use solverai_api::{ClientError, DataManagerClient, ResourceId, ResourceKind};

use crate::registry::ResourceRegistry;

/// Client for the problem resources of the data manager.
///
/// A client is meant to be driven by one caller at a time: batches borrow it, and nothing
/// coordinates two callers flushing or deleting the same resources concurrently.
#[derive(Debug, Clone)]
pub struct SetupClient<R = DataManagerClient> {
    registry: R,
    delete_workers: Option<usize>,
}

impl<R: ResourceRegistry> SetupClient<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            delete_workers: None,
        }
    }

    /// Bound the number of concurrent requests of bulk deletions.
    pub fn with_delete_workers(mut self, workers: usize) -> Self {
        self.delete_workers = Some(workers.max(1));
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Send one create or update right away.
    pub fn submit(
        &self,
        operation: impl Into<ResourceOperation>,
    ) -> Result<ResourceId, SetupError> {
        let operation = operation.into();
        operation.validate()?;
        let id = operation.execute(&self.registry)?;
        log::debug!(
            "{} '{}' stored as {id}",
            operation.kind(),
            operation.display_name()
        );
        Ok(id)
    }

    /// Open a batch. Queued operations only run when the batch is flushed.
    pub fn batch(&self) -> Batch<'_, R> {
        Batch::new(self)
    }

    pub fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<(), SetupError> {
        self.registry.delete(kind, id)?;
        Ok(())
    }

    /// Delete every identifier of `ids`.
    ///
    /// Problems go first, since the data manager refuses to delete modules a problem still
    /// references. The modules of the four other kinds are then deleted concurrently. A failed
    /// deletion does not stop the others; all failures are reported together.
    pub fn delete_all(&self, ids: &ResourceIds) -> Result<(), DeleteError> {
        let problems: Vec<(ResourceKind, ResourceId)> = ids
            .get(ResourceKind::Problem)
            .iter()
            .map(|id| (ResourceKind::Problem, id.clone()))
            .collect();
        let modules: Vec<(ResourceKind, ResourceId)> = ResourceKind::MODULES
            .iter()
            .flat_map(|kind| ids.get(*kind).iter().map(move |id| (*kind, id.clone())))
            .collect();

        let mut failures = self.delete_concurrently(problems);
        failures.extend(self.delete_concurrently(modules));

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DeleteError { failures })
        }
    }

    /// Delete every resource of `kind` whose name matches `pattern` anywhere.
    ///
    /// Returns the identifiers that were deleted.
    pub fn delete_matching(
        &self,
        kind: ResourceKind,
        pattern: &str,
    ) -> Result<Vec<ResourceId>, SetupError> {
        let pattern = Regex::new(pattern)?;
        let ids = self.find_ids(kind, &pattern)?;
        let jobs = ids.iter().map(|id| (kind, id.clone())).collect();
        let failures = self.delete_concurrently(jobs);
        if failures.is_empty() {
            Ok(ids)
        } else {
            Err(DeleteError { failures }.into())
        }
    }

    /// Identifiers of the resources of `kind` whose name matches `pattern`, newest first.
    pub fn find_ids(
        &self,
        kind: ResourceKind,
        pattern: &Regex,
    ) -> Result<Vec<ResourceId>, SetupError> {
        Ok(self
            .registry
            .list(kind)?
            .into_iter()
            .filter(|resource| pattern.is_match(&resource.name))
            .map(|resource| resource.id)
            .collect())
    }

    /// Identifiers of the resources of `kind` named exactly `name`, newest first.
    ///
    /// The match is case-sensitive and `name` is taken literally.
    pub fn lookup_by_exact_name(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Vec<ResourceId>, SetupError> {
        let pattern = Regex::new(&format!("^{}$", regex::escape(name)))?;
        self.find_ids(kind, &pattern)
    }

    /// The most recent problem named exactly `name`.
    pub fn problem_id_by_name(&self, name: &str) -> Result<ResourceId, SetupError> {
        self.lookup_by_exact_name(ResourceKind::Problem, name)?
            .into_iter()
            .next()
            .ok_or_else(|| SetupError::NotFound {
                kind: ResourceKind::Problem,
                name: name.to_string(),
            })
    }

    /// The most recent problem named exactly `name`, along with the modules it references.
    pub fn problem_modules_by_name(&self, name: &str) -> Result<ResourceIds, SetupError> {
        let problem_id = self.problem_id_by_name(name)?;
        let detail = self.registry.get_one(ResourceKind::Problem, &problem_id)?;

        let mut ids = ResourceIds::new();
        ids.push(ResourceKind::Problem, problem_id);
        for kind in ResourceKind::MODULES {
            let Some(field) = kind.problem_field() else {
                continue;
            };
            for id in module_ids(&detail, field)? {
                ids.push(kind, id);
            }
        }
        Ok(ids)
    }

    fn delete_concurrently(&self, jobs: Vec<(ResourceKind, ResourceId)>) -> Vec<DeleteFailure> {
        let workers = self.delete_workers.unwrap_or_else(pool::default_workers);
        pool::run_indexed(jobs, Some(workers), |_, (kind, id)| {
            match self.registry.delete(kind, &id) {
                Ok(()) => {
                    log::debug!("Deleted {kind}/{id}");
                    None
                }
                Err(error) => {
                    log::warn!("Failed deleting {kind}/{id}: {error}");
                    Some(DeleteFailure { kind, id, error })
                }
            }
        })
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Read a list of identifiers from a problem document. Missing and null lists are empty.
fn module_ids(detail: &Value, field: &str) -> Result<Vec<ResourceId>, ClientError> {
    match detail.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value @ Value::Array(_)) => serde_json::from_value(value.clone()).map_err(|e| {
            ClientError::MalformedResponse(format!("problem field '{field}': {e}"))
        }),
        Some(other) => Err(ClientError::MalformedResponse(format!(
            "problem field '{field}' is not a list: {other}"
        ))),
    }
}
