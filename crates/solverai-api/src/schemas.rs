//! Request and response schemas of the SolverAI services
//!
//! - [`request`] - Schemas for data sent to the services
//! - [`response`] - Schemas for data received from the services
//!
//! Common types are re-exported at the module level for convenience.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
