use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ClientSettings, FailureKind, RemoteError};

/// Shared HTTP client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl RemoteClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| RemoteError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `{server_url}/{segments...}`
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut raw = self.settings.server_url().to_string();
        for segment in segments {
            raw.push('/');
            raw.push_str(segment);
        }
        Url::parse(&raw)
            .map_err(|err| RemoteError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Sends the request and buffers the body. Only transport problems are errors here.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<RemoteResponse, RemoteError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(RemoteResponse { status, body })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
        self.send(self.request(Method::GET, url)).await?.into_json()
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, url).json(body))
            .await?
            .into_json()
    }

    pub(crate) async fn send_empty(&self, method: Method, url: Url) -> Result<(), RemoteError> {
        self.send(self.request(method, url))
            .await?
            .into_success()
            .map(|_| ())
    }
}

pub(crate) struct RemoteResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RemoteResponse {
    pub(crate) fn into_success(self) -> Result<String, RemoteError> {
        if self.status.is_success() {
            return Ok(self.body);
        }
        Err(status_error(self.status).with_reason(error_field(&self.body)))
    }

    pub(crate) fn into_json<T: DeserializeOwned>(self) -> Result<T, RemoteError> {
        let body = self.into_success()?;
        serde_json::from_str(&body)
            .map_err(|err| RemoteError::new(FailureKind::InvalidPayload, err.to_string()))
    }
}

pub(crate) fn status_error(status: StatusCode) -> RemoteError {
    RemoteError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
}

/// Extracts `{"error": "..."}` from a response body, if it is shaped that way.
pub(crate) fn error_field(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return RemoteError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    RemoteError::new(FailureKind::Network, err.to_string())
}
