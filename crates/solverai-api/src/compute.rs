use reqwest::{Method, StatusCode};

use crate::client::{Client, ResponseExt};
use crate::error::ClientError;
use crate::resource::ResourceId;
use crate::schemas::{ProblemIoSchema, SolveReply, SolveRequestSchema, SolveResponseSchema};

/// Status the compute service answers with while a problem environment is being provisioned.
pub const SETUP_IN_PROGRESS: StatusCode = StatusCode::ACCEPTED;

/// Raw calls to the compute service. None of them retry.
#[derive(Debug, Clone)]
pub struct ComputeApi {
    client: Client,
}

impl ComputeApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn problem_status(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError> {
        self.client
            .get_json(format!("check_problem_status/{problem_id}"))
    }

    pub fn problem_setup(&self, problem_id: &ResourceId) -> Result<ProblemIoSchema, ClientError> {
        self.client.get_json(format!("problem_setup/{problem_id}"))
    }

    /// Send one solve request.
    ///
    /// A `202 Accepted` answer is reported as [`SolveReply::SetupInProgress`], any other success
    /// must carry the `results` document.
    pub fn solve(&self, request: &SolveRequestSchema) -> Result<SolveReply, ClientError> {
        let response = self
            .client
            .request(Method::POST, "solvejson/")?
            .json(request)
            .send()?
            .map_to_solverai_err()?;

        if response.status() == SETUP_IN_PROGRESS {
            return Ok(SolveReply::SetupInProgress);
        }

        let text = response.text()?;
        let body: SolveResponseSchema = serde_json::from_str(&text)
            .map_err(|e| ClientError::MalformedResponse(format!("solve response: {e}")))?;
        Ok(SolveReply::Completed(body.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub_server::{StubResponse, StubServer};
    use serde_json::json;

    fn request() -> SolveRequestSchema {
        SolveRequestSchema {
            problem_id: ResourceId::Int(5),
            parameters: json!({"inputs": {"x": 1}}).as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn accepted_means_setup_in_progress() {
        let server = StubServer::start(vec![StubResponse::json(
            202,
            json!({"detail": "Setting up"}),
        )]);
        let api = ComputeApi::new(server.client());

        assert_eq!(api.solve(&request()).unwrap(), SolveReply::SetupInProgress);

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/solvejson/");
        assert_eq!(
            requests[0].body_json(),
            json!({"problemId": 5, "inputs": {"x": 1}})
        );
    }

    #[test]
    fn ok_answer_carries_the_results() {
        let server = StubServer::start(vec![StubResponse::json(
            200,
            json!({"results": {"Number Of Results": 0}}),
        )]);
        let api = ComputeApi::new(server.client());

        let SolveReply::Completed(results) = api.solve(&request()).unwrap() else {
            panic!("expected results");
        };

        assert_eq!(results.get("Number Of Results"), Some(&json!(0)));
        server.requests();
    }

    #[test]
    fn ok_answer_without_results_is_malformed() {
        let server = StubServer::start(vec![StubResponse::json(200, json!({"status": "done"}))]);
        let api = ComputeApi::new(server.client());

        let err = api.solve(&request()).unwrap_err();

        assert!(matches!(err, ClientError::MalformedResponse(_)));
        server.requests();
    }

    #[test]
    fn error_answer_is_not_retried_here() {
        let server = StubServer::start(vec![StubResponse::json(
            500,
            json!({"detail": "solver crashed"}),
        )]);
        let api = ComputeApi::new(server.client());

        let err = api.solve(&request()).unwrap_err();

        assert_eq!(err.to_string(), "Api error 500 Internal Server Error: solver crashed");
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn status_and_setup_paths() {
        let server = StubServer::start(vec![
            StubResponse::json(200, json!({"inputs": ["x"], "outputs": ["y"]})),
            StubResponse::json(200, json!({"inputs": ["x"], "outputs": []})),
        ]);
        let api = ComputeApi::new(server.client());

        let status = api.problem_status(&ResourceId::Int(5)).unwrap();
        let setup = api.problem_setup(&ResourceId::Int(5)).unwrap();

        assert_eq!(status.outputs, json!(["y"]));
        assert_eq!(setup.outputs, json!([]));
        let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/check_problem_status/5", "/problem_setup/5"]);
    }
}
