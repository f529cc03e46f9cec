//! This module provides the [SolverAi] struct, the entry point to the SolverAI services.

use solverai_api::{
    Client, ClientError, ComputeApi, DataManagerClient, ResourceId, SolverAiCredentials,
};

use crate::compute::ComputeClient;
use crate::config::{ConfigError, SolverAiConfig};
use crate::setup::SetupClient;

/// Errors that can occur during the initialization of the [SolverAi] client.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    /// One of the two service URLs was not given to the builder.
    #[error("Missing {0} url")]
    MissingUrl(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// This builder struct is used to create a [SolverAi] client.
pub struct SolverAiBuilder {
    credentials: SolverAiCredentials,
    datamanager_url: Option<String>,
    computer_url: Option<String>,
}

impl SolverAiBuilder {
    pub fn new(credentials: impl Into<SolverAiCredentials>) -> Self {
        SolverAiBuilder {
            credentials: credentials.into(),
            datamanager_url: None,
            computer_url: None,
        }
    }

    pub fn with_datamanager_url(mut self, url: impl Into<String>) -> Self {
        self.datamanager_url = Some(url.into());
        self
    }

    pub fn with_computer_url(mut self, url: impl Into<String>) -> Self {
        self.computer_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<SolverAi, InitError> {
        let datamanager_url = self
            .datamanager_url
            .ok_or(InitError::MissingUrl("data manager"))?;
        let computer_url = self.computer_url.ok_or(InitError::MissingUrl("compute"))?;

        let datamanager = Client::from_url_str(&datamanager_url, self.credentials.clone())?;
        let computer = Client::from_url_str(&computer_url, self.credentials)?;
        Ok(SolverAi::new(datamanager, computer))
    }
}

/// Handle on the data manager and compute services of one account.
#[derive(Debug, Clone)]
pub struct SolverAi {
    datamanager: DataManagerClient,
    compute: ComputeApi,
}

impl SolverAi {
    pub fn builder(credentials: impl Into<SolverAiCredentials>) -> SolverAiBuilder {
        SolverAiBuilder::new(credentials)
    }

    pub fn from_config(config: &SolverAiConfig) -> Self {
        let credentials = config.credentials.clone();
        SolverAi::new(
            Client::new(config.datamanager_url.clone(), credentials.clone()),
            Client::new(config.computer_url.clone(), credentials),
        )
    }

    /// Creates a new [SolverAi] instance from environment variables.
    ///
    /// See [`SolverAiConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, InitError> {
        Ok(Self::from_config(&SolverAiConfig::from_env()?))
    }

    fn new(datamanager: Client, computer: Client) -> Self {
        SolverAi {
            datamanager: DataManagerClient::new(datamanager),
            compute: ComputeApi::new(computer),
        }
    }

    /// Check that the data manager accepts the token.
    pub fn validate_token(&self) -> Result<(), ClientError> {
        self.datamanager.validate_token()
    }

    pub fn datamanager(&self) -> &DataManagerClient {
        &self.datamanager
    }

    /// Client creating and deleting the resources of problems.
    pub fn setup(&self) -> SetupClient {
        SetupClient::new(self.datamanager.clone())
    }

    /// Client solving the problem `problem_id`.
    pub fn compute(&self, problem_id: impl Into<ResourceId>) -> ComputeClient {
        ComputeClient::new(self.compute.clone(), problem_id)
    }
}
