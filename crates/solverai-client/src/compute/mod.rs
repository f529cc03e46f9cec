//! Solving a stored problem.
//!
//! The compute service answers `202 Accepted` while the environment of a problem is being
//! provisioned. [`ComputeClient::submit_and_await`] keeps resending the request at a fixed
//! interval until the service answers with results or an error.

mod literal;
mod results;

pub use results::{ComputeResults, ResultValue, ResultsError};
pub use solverai_api::schemas::ProblemIoSchema;

use std::time::Duration;

use serde_json::Value;
use solverai_api::schemas::{Fields, SolveReply, SolveRequestSchema};
use solverai_api::{ClientError, ComputeApi, ResourceId};

/// Delay between two solve attempts while the problem setup is in progress.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest accepted delay between two solve attempts.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

const PROBLEM_ID_FIELD: &str = "problemId";

/// The compute endpoints used by [`ComputeClient`].
pub trait SolveBackend {
    fn solve(&self, request: &SolveRequestSchema) -> Result<SolveReply, ClientError>;

    fn problem_status(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError>;

    fn problem_setup(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError>;
}

impl SolveBackend for ComputeApi {
    fn solve(&self, request: &SolveRequestSchema) -> Result<SolveReply, ClientError> {
        ComputeApi::solve(self, request)
    }

    fn problem_status(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError> {
        ComputeApi::problem_status(self, problem_id)
    }

    fn problem_setup(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError> {
        ComputeApi::problem_setup(self, problem_id)
    }
}

/// Waits between two solve attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(
        "Problem setup still in progress after waiting {}s over {attempts} attempts",
        .waited.as_secs()
    )]
    DeadlineExceeded { waited: Duration, attempts: u32 },
    #[error("Failed to read solve results: {0}")]
    Results(#[from] ResultsError),
}

/// Parameters of a solve request. The problem id is added by the [`ComputeClient`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputeInput {
    parameters: Fields,
}

impl ComputeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn parameters(&self) -> &Fields {
        &self.parameters
    }

    fn to_request(&self, problem_id: &ResourceId) -> SolveRequestSchema {
        let mut parameters = self.parameters.clone();
        parameters.remove(PROBLEM_ID_FIELD);
        SolveRequestSchema {
            problem_id: problem_id.clone(),
            parameters,
        }
    }
}

impl From<Fields> for ComputeInput {
    fn from(parameters: Fields) -> Self {
        Self { parameters }
    }
}

/// Client for the compute service, bound to one problem.
#[derive(Debug, Clone)]
pub struct ComputeClient<B = ComputeApi, S = ThreadSleeper> {
    backend: B,
    sleeper: S,
    problem_id: ResourceId,
    poll_interval: Duration,
    deadline: Option<Duration>,
}

impl<B: SolveBackend> ComputeClient<B, ThreadSleeper> {
    pub fn new(backend: B, problem_id: impl Into<ResourceId>) -> Self {
        Self {
            backend,
            sleeper: ThreadSleeper,
            problem_id: problem_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl<B: SolveBackend, S: Sleeper> ComputeClient<B, S> {
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> ComputeClient<B, S2> {
        ComputeClient {
            backend: self.backend,
            sleeper,
            problem_id: self.problem_id,
            poll_interval: self.poll_interval,
            deadline: self.deadline,
        }
    }

    /// Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Give up once waiting another interval would exceed `deadline` in total.
    ///
    /// Only the time spent between attempts counts, not the requests themselves.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn problem_id(&self) -> &ResourceId {
        &self.problem_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Inputs and outputs of the problem, as currently known by the compute service.
    pub fn get_status(&self) -> Result<ProblemIoSchema, ComputeError> {
        Ok(self.backend.problem_status(&self.problem_id)?)
    }

    /// Inputs and outputs of the problem setup.
    pub fn get_setup(&self) -> Result<ProblemIoSchema, ComputeError> {
        Ok(self.backend.problem_setup(&self.problem_id)?)
    }

    /// Solve the problem, waiting for its setup to complete if needed.
    ///
    /// Without a deadline this blocks until the service stops answering "setup in progress".
    /// Any error answer ends the wait immediately.
    pub fn submit_and_await(&self, input: &ComputeInput) -> Result<ComputeResults, ComputeError> {
        let request = input.to_request(&self.problem_id);
        let mut waited = Duration::ZERO;
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.backend.solve(&request)? {
                SolveReply::Completed(results) => {
                    log::debug!(
                        "Problem {} solved after {attempts} attempts",
                        self.problem_id
                    );
                    return Ok(ComputeResults::from_payload(&results)?);
                }
                SolveReply::SetupInProgress => {
                    if let Some(deadline) = self.deadline {
                        if waited + self.poll_interval > deadline {
                            return Err(ComputeError::DeadlineExceeded { waited, attempts });
                        }
                    }
                    log::info!(
                        "Setup of problem {} in progress, retrying in {}s",
                        self.problem_id,
                        self.poll_interval.as_secs_f32()
                    );
                    self.sleeper.sleep(self.poll_interval);
                    waited += self.poll_interval;
                }
            }
        }
    }
}
