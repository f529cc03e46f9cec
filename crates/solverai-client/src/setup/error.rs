use std::fmt::{Display, Formatter};

use solverai_api::{ClientError, ResourceId, ResourceKind};

use super::ResourceIds;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The request cannot be sent as built: empty batch, empty attachment path.
    #[error("Invalid setup request: {0}")]
    Configuration(String),
    #[error("No {kind} found with name '{name}'")]
    NotFound { kind: ResourceKind, name: String },
    #[error("Invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

impl SetupError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SetupError::Configuration(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SetupError::NotFound { .. })
    }
}

/// One queued operation that failed during a flush.
#[derive(Debug)]
pub struct OperationFailure {
    pub kind: ResourceKind,
    /// Position of the operation in the batch.
    pub index: usize,
    pub name: String,
    pub error: ClientError,
}

impl Display for OperationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}] {}",
            self.kind, self.index, self.name, self.error
        )
    }
}

/// A flush in which at least one operation failed.
///
/// Everything the flush created has been deleted again, unless `rollback` says otherwise.
#[derive(Debug, thiserror::Error)]
#[error("{}", render_batch(.failures, .rollback))]
pub struct BatchError {
    pub failures: Vec<OperationFailure>,
    /// Identifiers created by the flush and deleted afterwards.
    pub rolled_back: ResourceIds,
    pub rollback: Option<DeleteError>,
}

fn render_batch(failures: &[OperationFailure], rollback: &Option<DeleteError>) -> String {
    let mut text = String::from("Batch completed with errors. Errors:");
    for failure in failures {
        text.push_str(&format!("\n{failure}"));
    }
    if let Some(rollback) = rollback {
        text.push_str(&format!("\nRollback also failed: {rollback}"));
    }
    text
}

#[derive(Debug)]
pub struct DeleteFailure {
    pub kind: ResourceKind,
    pub id: ResourceId,
    pub error: ClientError,
}

impl Display for DeleteFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed deleting {}/{}: {}", self.kind, self.id, self.error)
    }
}

/// Deletions that failed during a bulk delete. The other deletions went through.
#[derive(Debug, thiserror::Error)]
#[error("{}", render_lines(.failures))]
pub struct DeleteError {
    pub failures: Vec<DeleteFailure>,
}

fn render_lines(failures: &[DeleteFailure]) -> String {
    let lines: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!("Failed deleting with errors:\n{}", lines.join("\n"))
}
