use reqwest::Method;

use crate::client::{Client, ResponseExt};
use crate::error::ClientError;
use crate::resource::{ResourceId, ResourceKind};
use crate::schemas::{
    Attachment, CreatedResourceSchema, Fields, ResourceSummarySchema, strip_unset_fields,
};

const DATA_PREFIX: &str = "api/data";

/// Create, update and delete primitives of the data manager.
///
/// Resources live under `api/data/<kind>/` relative to the data manager URL.
#[derive(Debug, Clone)]
pub struct DataManagerClient {
    client: Client,
}

impl DataManagerClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a resource. POST to the collection endpoint of `kind`.
    pub fn create(
        &self,
        kind: ResourceKind,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError> {
        self.send(Method::POST, collection_path(kind), fields, attachment)
    }

    /// Update a resource. PATCH to the item endpoint; only the given fields change.
    pub fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError> {
        self.send(Method::PATCH, item_path(kind, id), fields, attachment)
    }

    pub fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<(), ClientError> {
        self.client.delete(item_path(kind, id))
    }

    /// All resources of `kind`, newest first.
    pub fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceSummarySchema>, ClientError> {
        self.client.get_json(collection_path(kind))
    }

    /// The full document of one resource.
    pub fn get_one(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<serde_json::Value, ClientError> {
        self.client.get_json(item_path(kind, id))
    }

    /// Check that the token is accepted by the data manager.
    pub fn validate_token(&self) -> Result<(), ClientError> {
        self.client
            .request(Method::GET, "validate-token/")?
            .send()?
            .map_to_solverai_err()?;
        Ok(())
    }

    fn send(
        &self,
        method: Method,
        path: String,
        fields: &Fields,
        attachment: Option<&Attachment>,
    ) -> Result<ResourceId, ClientError> {
        let fields = strip_unset_fields(fields);
        let created: CreatedResourceSchema = match attachment {
            Some(attachment) => {
                let file = attachment.blob.to_file_part()?;
                self.client
                    .send_multipart(method, path, &fields, &attachment.field, file)?
            }
            None => self.client.send_json(method, path, &fields)?,
        };
        Ok(created.id)
    }
}

fn collection_path(kind: ResourceKind) -> String {
    format!("{DATA_PREFIX}/{kind}/")
}

fn item_path(kind: ResourceKind, id: &ResourceId) -> String {
    format!("{DATA_PREFIX}/{kind}/{id}/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorBody;
    use crate::schemas::VECTORIZATION_INDICES;
    use crate::stub_server::{StubResponse, StubServer, TOKEN};
    use crate::table::Table;
    use reqwest::StatusCode;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn create_without_attachment_sends_json() {
        let server = StubServer::start(vec![StubResponse::json(201, json!({"id": 7}))]);
        let registry = DataManagerClient::new(server.client());

        let id = registry
            .create(
                ResourceKind::Equation,
                &fields(json!({"name": "eq", VECTORIZATION_INDICES: ""})),
                None,
            )
            .unwrap();

        assert_eq!(id, ResourceId::Int(7));
        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/data/equations/");
        assert_eq!(
            requests[0].header("authorization"),
            Some(format!("Token {TOKEN}").as_str())
        );
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
        assert_eq!(requests[0].body_json(), json!({"name": "eq"}));
    }

    #[test]
    fn update_with_attachment_sends_multipart() {
        let server = StubServer::start(vec![StubResponse::json(200, json!({"id": "hd-3"}))]);
        let registry = DataManagerClient::new(server.client());
        let table = Table::new(vec!["x".into()]).with_row([1]).unwrap();

        let id = registry
            .update(
                ResourceKind::HardData,
                &ResourceId::Int(3),
                &fields(json!({"name": "hd", VECTORIZATION_INDICES: ""})),
                Some(&Attachment::new("csv", table)),
            )
            .unwrap();

        assert_eq!(id, ResourceId::Text("hd-3".into()));
        let request = &server.requests()[0];
        assert_eq!(request.method, "PATCH");
        assert_eq!(request.path, "/api/data/hard-datas/3/");
        assert!(
            request
                .header("content-type")
                .is_some_and(|value| value.starts_with("multipart/form-data; boundary="))
        );
        let body = request.body_text();
        assert!(body.contains(r#"name="csv"; filename="data.csv""#));
        assert!(body.contains("x\n1\n"));
        assert!(body.contains(r#"name="name""#));
        assert!(!body.contains(VECTORIZATION_INDICES));
    }

    #[test]
    fn success_without_id_is_a_malformed_response() {
        let server = StubServer::start(vec![StubResponse::json(201, json!({"name": "eq"}))]);
        let registry = DataManagerClient::new(server.client());

        let err = registry
            .create(ResourceKind::Equation, &fields(json!({"name": "eq"})), None)
            .unwrap_err();

        assert!(matches!(err, ClientError::MalformedResponse(_)));
        server.requests();
    }

    #[test]
    fn json_error_body_is_decoded() {
        let server = StubServer::start(vec![StubResponse::json(
            400,
            json!({"detail": "name already taken"}),
        )]);
        let registry = DataManagerClient::new(server.client());

        let err = registry
            .create(ResourceKind::Code, &fields(json!({"name": "model"})), None)
            .unwrap_err();

        let ClientError::ApiError { status, body } = &err else {
            panic!("expected an api error, got {err:?}");
        };
        assert_eq!(*status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail(), Some("name already taken"));
        server.requests();
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        let server = StubServer::start(vec![StubResponse::text(502, "<html>Bad Gateway</html>")]);
        let registry = DataManagerClient::new(server.client());

        let err = registry
            .delete(ResourceKind::Problem, &ResourceId::Int(9))
            .unwrap_err();

        let ClientError::ApiError { status, body } = &err else {
            panic!("expected an api error, got {err:?}");
        };
        assert_eq!(*status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, &ApiErrorBody::Raw("<html>Bad Gateway</html>".into()));
        let requests = server.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/api/data/problems/9/");
    }

    #[test]
    fn listing_and_token_validation() {
        let server = StubServer::start(vec![
            StubResponse::json(200, json!([{"id": 2, "name": "b"}, {"id": 1, "name": "a"}])),
            StubResponse::json(200, json!({})),
        ]);
        let registry = DataManagerClient::new(server.client());

        let listed = registry.list(ResourceKind::SoftData).unwrap();
        registry.validate_token().unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, ResourceId::Int(2));
        let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/api/data/soft-datas/", "/validate-token/"]);
    }

    #[test]
    fn paths_follow_the_rest_layout() {
        assert_eq!(collection_path(ResourceKind::HardData), "api/data/hard-datas/");
        assert_eq!(
            item_path(ResourceKind::Problem, &ResourceId::Int(12)),
            "api/data/problems/12/"
        );
    }
}
