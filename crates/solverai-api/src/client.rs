use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};

use crate::credentials::SolverAiCredentials;
use crate::error::{ApiErrorBody, ClientError};
use crate::schemas::Fields;
use crate::table::FilePart;

pub trait ResponseExt {
    fn map_to_solverai_err(self) -> Result<reqwest::blocking::Response, ClientError>;
}

impl ResponseExt for reqwest::blocking::Response {
    fn map_to_solverai_err(self) -> Result<reqwest::blocking::Response, ClientError> {
        if self.status().is_success() {
            Ok(self)
        } else {
            let status = self.status();
            let body = self
                .text()
                .map_err(|e| ClientError::UnknownError(e.to_string()))?;
            Err(ClientError::ApiError {
                status,
                body: ApiErrorBody::from_text(body),
            })
        }
    }
}

/// A client for making authenticated HTTP requests to one SolverAI service.
///
/// Every request carries the `Authorization: Token <token>` header. Paths are joined to the
/// base URL, so they must not start with a `/`.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::blocking::Client,
    base_url: Url,
    credentials: SolverAiCredentials,
}

impl Client {
    /// Create a new client for the service at `base_url`.
    pub fn new(base_url: Url, credentials: SolverAiCredentials) -> Self {
        Self::with_http_client(reqwest::blocking::Client::new(), base_url, credentials)
    }

    pub(crate) fn with_http_client(
        http_client: reqwest::blocking::Client,
        base_url: Url,
        credentials: SolverAiCredentials,
    ) -> Self {
        Client {
            http_client,
            base_url: with_trailing_slash(base_url),
            credentials,
        }
    }

    /// Parse `base_url` and create a client for it.
    pub fn from_url_str(
        base_url: &str,
        credentials: SolverAiCredentials,
    ) -> Result<Self, ClientError> {
        let url = base_url
            .trim()
            .parse::<Url>()
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self::new(url, credentials))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start an authenticated request. The response status is not checked.
    pub fn request(
        &self,
        method: Method,
        path: impl AsRef<str>,
    ) -> Result<reqwest::blocking::RequestBuilder, ClientError> {
        let url = self.join(path.as_ref())?;
        log::debug!("{method} {url}");
        Ok(self
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, self.credentials.authorization()))
    }

    pub fn get_json<R>(&self, path: impl AsRef<str>) -> Result<R, ClientError>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let response = self
            .request(Method::GET, path)?
            .send()?
            .map_to_solverai_err()?;
        decode_json(response)
    }

    /// Send `fields` as a JSON body and decode the JSON answer.
    pub fn send_json<R>(
        &self,
        method: Method,
        path: impl AsRef<str>,
        fields: &Fields,
    ) -> Result<R, ClientError>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let response = self
            .request(method, path)?
            .json(fields)
            .send()?
            .map_to_solverai_err()?;
        decode_json(response)
    }

    /// Send `fields` as form fields along with one file part and decode the JSON answer.
    pub fn send_multipart<R>(
        &self,
        method: Method,
        path: impl AsRef<str>,
        fields: &Fields,
        part_name: &str,
        file: FilePart,
    ) -> Result<R, ClientError>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let mut form = reqwest::blocking::multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key.clone(), form_value(value));
        }
        let part = reqwest::blocking::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.mime)?;
        form = form.part(part_name.to_string(), part);

        let response = self
            .request(method, path)?
            .multipart(form)
            .send()?
            .map_to_solverai_err()?;
        decode_json(response)
    }

    pub fn delete(&self, path: impl AsRef<str>) -> Result<(), ClientError> {
        self.request(Method::DELETE, path)?
            .send()?
            .map_to_solverai_err()?;
        Ok(())
    }

    /// Join the given path to the base URL.
    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{path}: {e}", self.base_url)))
    }
}

fn decode_json<R>(response: reqwest::blocking::Response) -> Result<R, ClientError>
where
    R: for<'de> serde::Deserialize<'de>,
{
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

/// Form fields are plain text: strings are sent unquoted, everything else as JSON.
fn form_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
