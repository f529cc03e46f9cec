use serde::Serialize;

use crate::table::Blob;

/// Payload fields of a create or update request, sent as a JSON object or as form fields.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Optional field that the services expect to be omitted rather than sent empty.
pub const VECTORIZATION_INDICES: &str = "vectorizationIndices";

/// A file attached to a request, sent as the multipart part named `field`.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct Attachment {
    #[new(into)]
    pub field: String,
    #[new(into)]
    pub blob: Blob,
}

/// Body of a solve request: the problem id followed by caller supplied parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveRequestSchema {
    #[serde(rename = "problemId")]
    pub problem_id: crate::ResourceId,
    #[serde(flatten)]
    pub parameters: Fields,
}

/// Drop optional fields the services treat as unset when empty.
pub fn strip_unset_fields(fields: &Fields) -> Fields {
    let mut fields = fields.clone();
    let unset = fields
        .get(VECTORIZATION_INDICES)
        .is_some_and(|value| match value {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            _ => false,
        });
    if unset {
        fields.remove(VECTORIZATION_INDICES);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_vectorization_indices_are_stripped() {
        let stripped =
            strip_unset_fields(&fields(json!({"name": "eq", "vectorizationIndices": ""})));
        assert_eq!(stripped, fields(json!({"name": "eq"})));
    }

    #[test]
    fn given_vectorization_indices_are_kept() {
        let original = fields(json!({"name": "eq", "vectorizationIndices": "0,1"}));
        assert_eq!(strip_unset_fields(&original), original);
    }

    #[test]
    fn solve_request_flattens_parameters() {
        let request = SolveRequestSchema {
            problem_id: crate::ResourceId::Int(7),
            parameters: fields(json!({"numberOfResults": 2})),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"problemId": 7, "numberOfResults": 2})
        );
    }
}
