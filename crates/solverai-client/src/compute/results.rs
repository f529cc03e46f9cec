use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};
use solverai_api::{ClientError, Table};

use super::literal;

const NUMBER_OF_RESULTS: &str = "Number Of Results";
const OBJECTIVE_NAMES: &str = "Objective Variable Names";
const CONSTRAINT_NAMES: &str = "Constraint Variable Names";
const INPUT_NAMES: &str = "Input Variable Names";
const OUTPUT_NAMES: &str = "Output Variable Names";

/// One element of a result vector.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl ResultValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for ResultValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultValue::Number(n) => write!(f, "{n}"),
            ResultValue::Text(s) => write!(f, "{s}"),
            ResultValue::Bool(b) => write!(f, "{b}"),
            ResultValue::Null => Ok(()),
        }
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        ResultValue::Number(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("Missing key '{0}' in solve results")]
    MissingKey(String),
    #[error("Malformed value for '{key}': {reason}")]
    Malformed { key: String, reason: String },
    #[error("'{key}' holds {actual} values but {expected} variable names were given")]
    LengthMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },
}

/// Solutions returned by a solve request.
///
/// `x()[i]` and `y()[i]` are the input and output values of solution `i`, in the order of
/// [`ComputeResults::input_variable_names`] and [`ComputeResults::output_variable_names`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeResults {
    number_of_results: usize,
    objective_variable_names: Vec<String>,
    constraint_variable_names: Vec<String>,
    input_variable_names: Vec<String>,
    output_variable_names: Vec<String>,
    x: Vec<Vec<ResultValue>>,
    y: Vec<Vec<ResultValue>>,
}

impl ComputeResults {
    /// Decode the `results` document of a solve response.
    ///
    /// Lists may be list literals embedded in strings or plain JSON arrays.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ResultsError> {
        let number_of_results = count(payload)?;
        let input_variable_names = names(payload, INPUT_NAMES)?;
        let output_variable_names = names(payload, OUTPUT_NAMES)?;

        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..number_of_results {
            x.push(vector(payload, &format!("X{i}"), input_variable_names.len())?);
            y.push(vector(payload, &format!("Y{i}"), output_variable_names.len())?);
        }

        Ok(Self {
            number_of_results,
            objective_variable_names: names(payload, OBJECTIVE_NAMES)?,
            constraint_variable_names: names(payload, CONSTRAINT_NAMES)?,
            input_variable_names,
            output_variable_names,
            x,
            y,
        })
    }

    pub fn number_of_results(&self) -> usize {
        self.number_of_results
    }

    pub fn objective_variable_names(&self) -> &[String] {
        &self.objective_variable_names
    }

    pub fn constraint_variable_names(&self) -> &[String] {
        &self.constraint_variable_names
    }

    pub fn input_variable_names(&self) -> &[String] {
        &self.input_variable_names
    }

    pub fn output_variable_names(&self) -> &[String] {
        &self.output_variable_names
    }

    pub fn x(&self) -> &[Vec<ResultValue>] {
        &self.x
    }

    pub fn y(&self) -> &[Vec<ResultValue>] {
        &self.y
    }

    /// The input vectors as numbers. Fails on the first non-numeric value.
    pub fn x_numeric(&self) -> Result<Vec<Vec<f64>>, ResultsError> {
        numeric(&self.x, "X")
    }

    /// The output vectors as numbers. Fails on the first non-numeric value.
    pub fn y_numeric(&self) -> Result<Vec<Vec<f64>>, ResultsError> {
        numeric(&self.y, "Y")
    }

    /// One row per solution: the inputs that are not also outputs, followed by the outputs.
    pub fn to_table(&self) -> Result<Table, ClientError> {
        let kept: Vec<usize> = self
            .input_variable_names
            .iter()
            .enumerate()
            .filter(|(_, name)| !self.output_variable_names.contains(name))
            .map(|(i, _)| i)
            .collect();

        let columns = kept
            .iter()
            .map(|i| self.input_variable_names[*i].clone())
            .chain(self.output_variable_names.iter().cloned())
            .collect();
        let mut table = Table::new(columns);
        for (x, y) in self.x.iter().zip(&self.y) {
            table.push_row(kept.iter().map(|i| &x[*i]).chain(y))?;
        }
        Ok(table)
    }
}

fn field<'a>(payload: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ResultsError> {
    payload
        .get(key)
        .ok_or_else(|| ResultsError::MissingKey(key.to_string()))
}

fn malformed(key: &str, reason: impl Into<String>) -> ResultsError {
    ResultsError::Malformed {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn count(payload: &Map<String, Value>) -> Result<usize, ResultsError> {
    let value = field(payload, NUMBER_OF_RESULTS)?;
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| malformed(NUMBER_OF_RESULTS, format!("expected a count, got {value}")))
}

fn list(payload: &Map<String, Value>, key: &str) -> Result<Vec<ResultValue>, ResultsError> {
    match field(payload, key)? {
        Value::String(text) => literal::parse_list(text).map_err(|reason| malformed(key, reason)),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Number(n) => n
                    .as_f64()
                    .map(ResultValue::Number)
                    .ok_or_else(|| malformed(key, format!("{n} is not a float"))),
                Value::String(s) => Ok(ResultValue::Text(s.clone())),
                Value::Bool(b) => Ok(ResultValue::Bool(*b)),
                Value::Null => Ok(ResultValue::Null),
                other => Err(malformed(key, format!("unexpected nested value {other}"))),
            })
            .collect(),
        other => Err(malformed(key, format!("expected a list, got {other}"))),
    }
}

fn names(payload: &Map<String, Value>, key: &str) -> Result<Vec<String>, ResultsError> {
    list(payload, key)?
        .into_iter()
        .map(|value| match value {
            ResultValue::Text(name) => Ok(name),
            other => Err(malformed(key, format!("expected variable names, got '{other}'"))),
        })
        .collect()
}

fn vector(
    payload: &Map<String, Value>,
    key: &str,
    expected: usize,
) -> Result<Vec<ResultValue>, ResultsError> {
    let values = list(payload, key)?;
    if values.len() != expected {
        return Err(ResultsError::LengthMismatch {
            key: key.to_string(),
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

fn numeric(vectors: &[Vec<ResultValue>], prefix: &str) -> Result<Vec<Vec<f64>>, ResultsError> {
    vectors
        .iter()
        .enumerate()
        .map(|(i, vector)| {
            vector
                .iter()
                .map(|value| {
                    value.as_f64().ok_or_else(|| {
                        malformed(&format!("{prefix}{i}"), format!("'{value}' is not a number"))
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn two_results() -> Map<String, Value> {
        payload(json!({
            "Number Of Results": 2,
            "Objective Variable Names": "['y']",
            "Constraint Variable Names": "[]",
            "Input Variable Names": "['a', 'b']",
            "Output Variable Names": "['y']",
            "X0": "[1,2]",
            "X1": "[3,4]",
            "Y0": "[5]",
            "Y1": "[6]"
        }))
    }

    #[test]
    fn vectors_are_decoded_per_result() {
        let results = ComputeResults::from_payload(&two_results()).unwrap();

        assert_eq!(results.number_of_results(), 2);
        assert_eq!(results.x_numeric().unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(results.y_numeric().unwrap(), vec![vec![5.0], vec![6.0]]);
        assert_eq!(results.input_variable_names(), ["a", "b"]);
        assert_eq!(results.objective_variable_names(), ["y"]);
        assert!(results.constraint_variable_names().is_empty());
    }

    #[test]
    fn count_and_lists_may_arrive_as_json() {
        let results = ComputeResults::from_payload(&payload(json!({
            "Number Of Results": "1",
            "Objective Variable Names": ["y"],
            "Constraint Variable Names": [],
            "Input Variable Names": ["a"],
            "Output Variable Names": ["y"],
            "X0": [0.5],
            "Y0": "[1.5]"
        })))
        .unwrap();

        assert_eq!(results.x(), [vec![ResultValue::Number(0.5)]]);
        assert_eq!(results.y(), [vec![ResultValue::Number(1.5)]]);
    }

    #[test]
    fn missing_vector_is_reported_by_key() {
        let mut payload = two_results();
        payload.remove("Y1");

        let err = ComputeResults::from_payload(&payload).unwrap_err();

        assert!(matches!(err, ResultsError::MissingKey(key) if key == "Y1"));
    }

    #[test]
    fn huge_count_without_vectors_is_a_missing_key() {
        let mut payload = two_results();
        for key in ["X0", "X1", "Y0", "Y1"] {
            payload.remove(key);
        }
        payload.insert("Number Of Results".into(), json!(u64::MAX));

        let err = ComputeResults::from_payload(&payload).unwrap_err();

        assert!(matches!(err, ResultsError::MissingKey(key) if key == "X0"));
    }

    #[test]
    fn malformed_literal_is_reported_by_key() {
        let mut payload = two_results();
        payload.insert("X1".into(), json!("[3, 4"));

        let err = ComputeResults::from_payload(&payload).unwrap_err();

        assert!(matches!(err, ResultsError::Malformed { key, .. } if key == "X1"));
    }

    #[test]
    fn vector_width_must_match_the_names() {
        let mut payload = two_results();
        payload.insert("Y0".into(), json!("[5, 7]"));

        let err = ComputeResults::from_payload(&payload).unwrap_err();

        assert!(matches!(
            err,
            ResultsError::LengthMismatch { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn negative_count_is_malformed() {
        let mut payload = two_results();
        payload.insert("Number Of Results".into(), json!(-1));

        let err = ComputeResults::from_payload(&payload).unwrap_err();

        assert!(matches!(err, ResultsError::Malformed { .. }));
    }

    #[test]
    fn table_drops_inputs_repeated_as_outputs() {
        let results = ComputeResults::from_payload(&payload(json!({
            "Number Of Results": 1,
            "Objective Variable Names": "['y']",
            "Constraint Variable Names": "[]",
            "Input Variable Names": "['a', 'y', 'b']",
            "Output Variable Names": "['y']",
            "X0": "[1, 9, 2.5]",
            "Y0": "[3]"
        })))
        .unwrap();

        let table = results.to_table().unwrap();

        assert_eq!(table.columns(), ["a", "b", "y"]);
        assert_eq!(table.rows(), [vec!["1", "2.5", "3"]]);
    }

    #[test]
    fn text_values_are_not_numeric() {
        let mut payload = two_results();
        payload.insert("X1".into(), json!("['low', 4]"));

        let results = ComputeResults::from_payload(&payload).unwrap();

        assert!(results.x_numeric().is_err());
        assert!(results.y_numeric().is_ok());
    }
}
