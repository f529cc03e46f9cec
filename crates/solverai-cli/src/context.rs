use std::path::PathBuf;

use anyhow::Context as _;
use solverai_client::{IdsFile, ResourceId, SolverAi, SolverAiConfig};

use crate::print_debug;

/// Settings shared by every command.
pub struct CliContext {
    config_path: PathBuf,
    ids_file: IdsFile,
}

impl CliContext {
    pub fn new(config_path: impl Into<PathBuf>, ids_file: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            ids_file: IdsFile::new(ids_file),
        }
    }

    pub fn ids_file(&self) -> &IdsFile {
        &self.ids_file
    }

    /// Read the settings file, or the environment when there is no such file.
    pub fn load_config(&self) -> anyhow::Result<SolverAiConfig> {
        if self.config_path.exists() {
            print_debug!("Reading settings from {}", self.config_path.display());
            SolverAiConfig::from_file(&self.config_path).with_context(|| {
                format!("Failed to read settings from {}", self.config_path.display())
            })
        } else {
            print_debug!(
                "{} not found, reading settings from the environment",
                self.config_path.display()
            );
            SolverAiConfig::from_env().context("Failed to read settings from the environment")
        }
    }

    pub fn solverai(&self) -> anyhow::Result<SolverAi> {
        Ok(SolverAi::from_config(&self.load_config()?))
    }

    /// The given problem id, or the one recorded in the ids file.
    pub fn problem_id(&self, given: Option<ResourceId>) -> anyhow::Result<ResourceId> {
        match given {
            Some(id) => Ok(id),
            None => self.ids_file.read_problem_id().with_context(|| {
                format!(
                    "No --problem-id given and none readable from {}",
                    self.ids_file.path().display()
                )
            }),
        }
    }
}
