//! Client SDK for the SolverAI services.
//!
//! ```no_run
//! use solverai_client::{ComputeInput, NewEquation, NewProblem, SolverAi, SolverAiConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let solverai = SolverAi::from_config(&SolverAiConfig::from_file("solverai.conf")?);
//! let setup = solverai.setup();
//!
//! let mut batch = setup.batch();
//! batch.queue(NewEquation::new("objective", "y = (x - 2)**2", "x, y"))?;
//! let modules = batch.flush(None)?;
//!
//! let problem = setup.submit(NewProblem::new("parabola").modules(&modules))?;
//! let results = solverai
//!     .compute(problem)
//!     .submit_and_await(&ComputeInput::new())?;
//! println!("{}", results.to_table()?.to_csv_string()?);
//! # Ok(())
//! # }
//! ```

pub mod compute;
pub mod config;
pub mod ids_file;
pub mod registry;
pub mod setup;

mod solverai;

pub use compute::{
    ComputeClient, ComputeError, ComputeInput, ComputeResults, ResultValue, ResultsError,
    SolveBackend,
};
pub use config::{ConfigError, SolverAiConfig};
pub use ids_file::{IdsFile, IdsFileError, IdsRecord};
pub use registry::ResourceRegistry;
pub use setup::{
    Batch, BatchError, CodePatch, DeleteError, EquationPatch, HardDataPatch, NewCode,
    NewEquation, NewHardData, NewProblem, NewSoftData, ProblemPatch, ResourceIds,
    ResourceOperation, SetupClient, SetupError, SoftDataPatch,
};
pub use solverai::{InitError, SolverAi, SolverAiBuilder};

pub use solverai_api::schemas::Fields;
pub use solverai_api::{
    Blob, ClientError, ResourceId, ResourceKind, SolverAiCredentials, Table,
};
