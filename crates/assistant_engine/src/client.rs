use std::time::Duration;

use assistant_logging::{assistant_debug, clip_for_log};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{FailureKind, RequestError, UploadReceipt};

pub const QUERY_PATH: &str = "query";
pub const UPLOAD_PATH: &str = "uploadfile/";
/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    /// Parses the backend base URL. A trailing `/` is added when missing so that
    /// endpoint paths are appended rather than replacing the last segment.
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let trimmed = base_url.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::new(
                FailureKind::InvalidUrl,
                format!("{normalized} cannot be a base url"),
            ));
        }
        Ok(Self {
            base_url,
            connect_timeout: None,
            request_timeout: None,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(path)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    response: String,
}

/// The two backend endpoints the chat client talks to.
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    async fn query(&self, prompt: &str) -> Result<String, RequestError>;

    async fn upload(&self, file_name: &str, bytes: Bytes) -> Result<UploadReceipt, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackendClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackendClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl BackendClient for ReqwestBackendClient {
    async fn query(&self, prompt: &str) -> Result<String, RequestError> {
        let url = self.settings.endpoint(QUERY_PATH)?;
        assistant_debug!("POST {} prompt={}", url, clip_for_log(prompt, 80));

        let response = self
            .client
            .post(url)
            .json(&QueryRequest { prompt })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let reply: QueryResponse = serde_json::from_slice(&body)
            .map_err(|err| RequestError::new(FailureKind::Decode, err.to_string()))?;
        Ok(reply.response)
    }

    async fn upload(&self, file_name: &str, bytes: Bytes) -> Result<UploadReceipt, RequestError> {
        let url = self.settings.endpoint(UPLOAD_PATH)?;
        assistant_debug!("POST {} file={} len={}", url, file_name, bytes.len());

        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(UploadReceipt {
            status: status.as_u16(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return RequestError::new(FailureKind::Decode, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
