//! Typed requests for each resource kind.
//!
//! `New*` requests create a resource and carry every required field. `*Patch` requests update
//! an existing resource and only send the fields that were set: empty strings and empty id
//! lists are left out.

use std::path::PathBuf;

use serde_json::{Value, json};
use solverai_api::schemas::{Fields, VECTORIZATION_INDICES};
use solverai_api::{Blob, ResourceId, ResourceKind};

use super::ResourceOperation;

const CODE_PART: &str = "code";
const CSV_PART: &str = "csv";

fn set(fields: &mut Fields, key: &str, value: impl Into<Value>) {
    fields.insert(key.to_string(), value.into());
}

fn set_non_empty(fields: &mut Fields, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        set(fields, key, value);
    }
}

fn set_ids(fields: &mut Fields, key: &str, ids: &[ResourceId]) {
    set(fields, key, json!(ids));
}

#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct NewEquation {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub equation: String,
    #[new(into)]
    pub variables: String,
    #[new(default)]
    pub vectorization_indices: String,
}

impl NewEquation {
    pub fn with_vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = indices.into();
        self
    }
}

impl From<NewEquation> for ResourceOperation {
    fn from(req: NewEquation) -> Self {
        let mut fields = Fields::new();
        set(&mut fields, "name", req.name);
        set(&mut fields, "equationString", req.equation);
        set(&mut fields, "variablesString", req.variables);
        set(&mut fields, VECTORIZATION_INDICES, req.vectorization_indices);
        ResourceOperation::create(ResourceKind::Equation, fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquationPatch {
    id: ResourceId,
    name: Option<String>,
    equation: Option<String>,
    variables: Option<String>,
    vectorization_indices: Option<String>,
}

impl EquationPatch {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            equation: None,
            variables: None,
            vectorization_indices: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn equation(mut self, equation: impl Into<String>) -> Self {
        self.equation = Some(equation.into());
        self
    }

    pub fn variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    pub fn vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = Some(indices.into());
        self
    }
}

impl From<EquationPatch> for ResourceOperation {
    fn from(patch: EquationPatch) -> Self {
        let mut fields = Fields::new();
        set_non_empty(&mut fields, "name", &patch.name);
        set_non_empty(&mut fields, "equationString", &patch.equation);
        set_non_empty(&mut fields, "variablesString", &patch.variables);
        set_non_empty(&mut fields, VECTORIZATION_INDICES, &patch.vectorization_indices);
        ResourceOperation::update(ResourceKind::Equation, patch.id, fields)
    }
}

/// A code module uploaded from a source file.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct NewCode {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub file: PathBuf,
    #[new(into)]
    pub variables_in: String,
    #[new(into)]
    pub variables_out: String,
    #[new(default)]
    pub vectorization_indices: String,
}

impl NewCode {
    pub fn with_vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = indices.into();
        self
    }
}

impl From<NewCode> for ResourceOperation {
    fn from(req: NewCode) -> Self {
        let mut fields = Fields::new();
        set(&mut fields, "name", req.name);
        set(&mut fields, "variablesStringIn", req.variables_in);
        set(&mut fields, "variablesStringOut", req.variables_out);
        set(&mut fields, VECTORIZATION_INDICES, req.vectorization_indices);
        ResourceOperation::create(ResourceKind::Code, fields).with_attachment(CODE_PART, req.file)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodePatch {
    id: ResourceId,
    name: Option<String>,
    file: Option<PathBuf>,
    variables_in: Option<String>,
    variables_out: Option<String>,
    vectorization_indices: Option<String>,
}

impl CodePatch {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            file: None,
            variables_in: None,
            variables_out: None,
            vectorization_indices: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn variables_in(mut self, variables: impl Into<String>) -> Self {
        self.variables_in = Some(variables.into());
        self
    }

    pub fn variables_out(mut self, variables: impl Into<String>) -> Self {
        self.variables_out = Some(variables.into());
        self
    }

    pub fn vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = Some(indices.into());
        self
    }
}

impl From<CodePatch> for ResourceOperation {
    fn from(patch: CodePatch) -> Self {
        let mut fields = Fields::new();
        set_non_empty(&mut fields, "name", &patch.name);
        set_non_empty(&mut fields, "variablesStringIn", &patch.variables_in);
        set_non_empty(&mut fields, "variablesStringOut", &patch.variables_out);
        set_non_empty(&mut fields, VECTORIZATION_INDICES, &patch.vectorization_indices);
        let op = ResourceOperation::update(ResourceKind::Code, patch.id, fields);
        match patch.file.filter(|file| !file.as_os_str().is_empty()) {
            Some(file) => op.with_attachment(CODE_PART, file),
            None => op,
        }
    }
}

/// A dataset the solver must match exactly.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct NewHardData {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub data: Blob,
    #[new(default)]
    pub vectorization_indices: String,
}

impl NewHardData {
    pub fn with_vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = indices.into();
        self
    }
}

impl From<NewHardData> for ResourceOperation {
    fn from(req: NewHardData) -> Self {
        let mut fields = Fields::new();
        set(&mut fields, "name", req.name);
        set(&mut fields, VECTORIZATION_INDICES, req.vectorization_indices);
        ResourceOperation::create(ResourceKind::HardData, fields)
            .with_attachment(CSV_PART, req.data)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HardDataPatch {
    id: ResourceId,
    name: Option<String>,
    data: Option<Blob>,
    vectorization_indices: Option<String>,
}

impl HardDataPatch {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            data: None,
            vectorization_indices: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the dataset. Without this call the dataset is left untouched.
    pub fn data(mut self, data: impl Into<Blob>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = Some(indices.into());
        self
    }
}

impl From<HardDataPatch> for ResourceOperation {
    fn from(patch: HardDataPatch) -> Self {
        let mut fields = Fields::new();
        set_non_empty(&mut fields, "name", &patch.name);
        set_non_empty(&mut fields, VECTORIZATION_INDICES, &patch.vectorization_indices);
        let op = ResourceOperation::update(ResourceKind::HardData, patch.id, fields);
        match patch.data {
            Some(data) => op.with_attachment(CSV_PART, data),
            None => op,
        }
    }
}

/// A dataset the solver fits a surrogate model to.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct NewSoftData {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub data: Blob,
    #[new(into)]
    pub variables_in: String,
    #[new(into)]
    pub variables_out: String,
    #[new(default)]
    pub vectorization_indices: String,
    #[new(default)]
    pub categorical_variables_in: String,
}

impl NewSoftData {
    pub fn with_vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = indices.into();
        self
    }

    pub fn with_categorical_variables_in(mut self, variables: impl Into<String>) -> Self {
        self.categorical_variables_in = variables.into();
        self
    }
}

impl From<NewSoftData> for ResourceOperation {
    fn from(req: NewSoftData) -> Self {
        let mut fields = Fields::new();
        set(&mut fields, "name", req.name);
        set(&mut fields, "variablesStringIn", req.variables_in);
        set(&mut fields, "variablesStringOut", req.variables_out);
        set(&mut fields, VECTORIZATION_INDICES, req.vectorization_indices);
        set(
            &mut fields,
            "categoricalVariablesStringIn",
            req.categorical_variables_in,
        );
        ResourceOperation::create(ResourceKind::SoftData, fields)
            .with_attachment(CSV_PART, req.data)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoftDataPatch {
    id: ResourceId,
    name: Option<String>,
    data: Option<Blob>,
    variables_in: Option<String>,
    variables_out: Option<String>,
    vectorization_indices: Option<String>,
    categorical_variables_in: Option<String>,
}

impl SoftDataPatch {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            data: None,
            variables_in: None,
            variables_out: None,
            vectorization_indices: None,
            categorical_variables_in: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the dataset. Without this call the dataset is left untouched.
    pub fn data(mut self, data: impl Into<Blob>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn variables_in(mut self, variables: impl Into<String>) -> Self {
        self.variables_in = Some(variables.into());
        self
    }

    pub fn variables_out(mut self, variables: impl Into<String>) -> Self {
        self.variables_out = Some(variables.into());
        self
    }

    pub fn vectorization_indices(mut self, indices: impl Into<String>) -> Self {
        self.vectorization_indices = Some(indices.into());
        self
    }

    pub fn categorical_variables_in(mut self, variables: impl Into<String>) -> Self {
        self.categorical_variables_in = Some(variables.into());
        self
    }
}

impl From<SoftDataPatch> for ResourceOperation {
    fn from(patch: SoftDataPatch) -> Self {
        let mut fields = Fields::new();
        set_non_empty(&mut fields, "name", &patch.name);
        set_non_empty(&mut fields, "variablesStringIn", &patch.variables_in);
        set_non_empty(&mut fields, "variablesStringOut", &patch.variables_out);
        set_non_empty(&mut fields, VECTORIZATION_INDICES, &patch.vectorization_indices);
        set_non_empty(
            &mut fields,
            "categoricalVariablesStringIn",
            &patch.categorical_variables_in,
        );
        let op = ResourceOperation::update(ResourceKind::SoftData, patch.id, fields);
        match patch.data {
            Some(data) => op.with_attachment(CSV_PART, data),
            None => op,
        }
    }
}

/// A problem tying together previously created modules.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct NewProblem {
    #[new(into)]
    pub name: String,
    #[new(default)]
    pub equations: Vec<ResourceId>,
    #[new(default)]
    pub codes: Vec<ResourceId>,
    #[new(default)]
    pub hard_datas: Vec<ResourceId>,
    #[new(default)]
    pub soft_datas: Vec<ResourceId>,
}

impl NewProblem {
    pub fn equations(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.equations = ids.into_iter().collect();
        self
    }

    pub fn codes(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.codes = ids.into_iter().collect();
        self
    }

    pub fn hard_datas(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.hard_datas = ids.into_iter().collect();
        self
    }

    pub fn soft_datas(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.soft_datas = ids.into_iter().collect();
        self
    }

    /// Reference every module of `ids`.
    pub fn modules(self, ids: &super::ResourceIds) -> Self {
        self.equations(ids.get(ResourceKind::Equation).to_vec())
            .codes(ids.get(ResourceKind::Code).to_vec())
            .hard_datas(ids.get(ResourceKind::HardData).to_vec())
            .soft_datas(ids.get(ResourceKind::SoftData).to_vec())
    }
}

impl From<NewProblem> for ResourceOperation {
    fn from(req: NewProblem) -> Self {
        let mut fields = Fields::new();
        set(&mut fields, "name", req.name);
        set_ids(&mut fields, "equations", &req.equations);
        set_ids(&mut fields, "codes", &req.codes);
        set_ids(&mut fields, "harddatas", &req.hard_datas);
        set_ids(&mut fields, "softdatas", &req.soft_datas);
        set(&mut fields, "tags", json!([]));
        ResourceOperation::create(ResourceKind::Problem, fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemPatch {
    id: ResourceId,
    name: Option<String>,
    equations: Vec<ResourceId>,
    codes: Vec<ResourceId>,
    hard_datas: Vec<ResourceId>,
    soft_datas: Vec<ResourceId>,
}

impl ProblemPatch {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            equations: Vec::new(),
            codes: Vec::new(),
            hard_datas: Vec::new(),
            soft_datas: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn equations(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.equations = ids.into_iter().collect();
        self
    }

    pub fn codes(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.codes = ids.into_iter().collect();
        self
    }

    pub fn hard_datas(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.hard_datas = ids.into_iter().collect();
        self
    }

    pub fn soft_datas(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.soft_datas = ids.into_iter().collect();
        self
    }
}

impl From<ProblemPatch> for ResourceOperation {
    fn from(patch: ProblemPatch) -> Self {
        let mut fields = Fields::new();
        set_non_empty(&mut fields, "name", &patch.name);
        for (key, ids) in [
            ("equations", &patch.equations),
            ("codes", &patch.codes),
            ("harddatas", &patch.hard_datas),
            ("softdatas", &patch.soft_datas),
        ] {
            if !ids.is_empty() {
                set_ids(&mut fields, key, ids);
            }
        }
        ResourceOperation::update(ResourceKind::Problem, patch.id, fields)
    }
}
