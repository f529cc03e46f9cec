use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};
use solverai_api::{ResourceId, ResourceKind};

use crate::setup::ResourceIds;

#[derive(thiserror::Error, Debug)]
pub enum IdsFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("No problem id recorded in {0}")]
    NoProblemId(PathBuf),
}

/// Identifiers of one problem setup, as stored in the ids file.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct IdsRecord {
    #[serde(default)]
    pub equation_ids: Vec<ResourceId>,
    #[serde(default)]
    pub code_ids: Vec<ResourceId>,
    #[serde(default)]
    pub hard_data_ids: Vec<ResourceId>,
    #[serde(default)]
    pub soft_data_ids: Vec<ResourceId>,
    #[serde(default)]
    pub problem_id: Option<ResourceId>,
}

impl From<&ResourceIds> for IdsRecord {
    /// Only the first problem of `ids` is kept.
    fn from(ids: &ResourceIds) -> Self {
        Self {
            equation_ids: ids.get(ResourceKind::Equation).to_vec(),
            code_ids: ids.get(ResourceKind::Code).to_vec(),
            hard_data_ids: ids.get(ResourceKind::HardData).to_vec(),
            soft_data_ids: ids.get(ResourceKind::SoftData).to_vec(),
            problem_id: ids.problem_id().cloned(),
        }
    }
}

impl From<IdsRecord> for ResourceIds {
    fn from(record: IdsRecord) -> Self {
        ResourceIds::new()
            .with(ResourceKind::Equation, record.equation_ids)
            .with(ResourceKind::Code, record.code_ids)
            .with(ResourceKind::HardData, record.hard_data_ids)
            .with(ResourceKind::SoftData, record.soft_data_ids)
            .with(ResourceKind::Problem, record.problem_id)
    }
}

/// JSON file handing identifiers over between runs. It is always read and written whole.
#[derive(Debug, Clone)]
pub struct IdsFile {
    path: PathBuf,
}

impl IdsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write(&self, record: &IdsRecord) -> Result<(), IdsFileError> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        log::debug!("Wrote ids to {}", self.path.display());
        Ok(())
    }

    pub fn read(&self) -> Result<IdsRecord, IdsFileError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn read_problem_id(&self) -> Result<ResourceId, IdsFileError> {
        self.read()?
            .problem_id
            .ok_or_else(|| IdsFileError::NoProblemId(self.path.clone()))
    }

    pub fn remove(&self) -> Result<(), IdsFileError> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}
