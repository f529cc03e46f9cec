use serde::Deserialize;

use crate::ResourceId;

/// Body returned by a successful create or update.
#[derive(Debug, Deserialize)]
pub struct CreatedResourceSchema {
    pub id: ResourceId,
}

/// One entry of a resource listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceSummarySchema {
    pub id: ResourceId,
    pub name: String,
}

/// Inputs and outputs of a problem as reported by the compute service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemIoSchema {
    pub inputs: serde_json::Value,
    pub outputs: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SolveResponseSchema {
    pub results: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of a solve request.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveReply {
    /// The problem environment is still being provisioned; the request must be sent again later.
    SetupInProgress,
    Completed(serde_json::Map<String, serde_json::Value>),
}
