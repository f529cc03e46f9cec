//! Blocking HTTP bindings for the SolverAI services.
//!
//! The data manager stores problem definitions (equations, code modules, datasets and
//! problems) and the compute service solves them. [`DataManagerClient`] and [`ComputeApi`]
//! map one method to one request; orchestration lives in `solverai-client`.

pub mod client;
pub mod compute;
pub mod credentials;
pub mod error;
pub mod registry;
pub mod resource;
pub mod schemas;
pub mod table;

#[cfg(test)]
mod stub_server;

pub use client::Client;
pub use compute::ComputeApi;
pub use credentials::SolverAiCredentials;
pub use error::{ApiErrorBody, ClientError};
pub use registry::DataManagerClient;
pub use resource::{ResourceId, ResourceKind};
pub use table::{Blob, Table};

pub use reqwest::{StatusCode, Url};
