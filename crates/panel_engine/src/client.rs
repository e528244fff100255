use std::time::Duration;

use bytes::Bytes;
use panel_logging::panel_debug;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{DOWNLOAD_FAILED_MESSAGE, START_FAILED_MESSAGE};
use crate::{ApiError, FailureKind, SearchPayload, StatusPayload};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the panel backend; endpoints are resolved relative to it.
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }
}

/// The four backend endpoints the panel talks to.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    async fn start_search(&self, payload: &SearchPayload) -> Result<(), ApiError>;
    async fn fetch_status(&self) -> Result<StatusPayload, ApiError>;
    async fn download(&self) -> Result<Bytes, ApiError>;
    async fn reset(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn start_search(&self, payload: &SearchPayload) -> Result<(), ApiError> {
        let url = self.endpoint("api/search")?;
        panel_debug!("POST {} payload={:?}", url, payload);
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body: serde_json::Value = read_json(response).await?;
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                error_field(&body).unwrap_or(START_FAILED_MESSAGE),
            ));
        }
        Ok(())
    }

    async fn fetch_status(&self) -> Result<StatusPayload, ApiError> {
        let url = self.endpoint("api/status")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn download(&self) -> Result<Bytes, ApiError> {
        let url = self.endpoint("api/download")?;
        panel_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_json::<serde_json::Value>(response)
                .await
                .unwrap_or_default();
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                error_field(&body).unwrap_or(DOWNLOAD_FAILED_MESSAGE),
            ));
        }

        response.bytes().await.map_err(map_reqwest_error)
    }

    async fn reset(&self) -> Result<(), ApiError> {
        let url = self.endpoint("api/reset")?;
        panel_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

/// Decode a JSON body, refusing anything not labelled as JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if !content_type.as_deref().is_some_and(is_json) {
        return Err(ApiError::malformed(content_type));
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| {
        panel_debug!("JSON decode failed: {}", err);
        ApiError::malformed(content_type)
    })
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(JSON)
}

fn error_field(body: &serde_json::Value) -> Option<&str> {
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
