use reqwest::{Client, Error as ReqwestError, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use slotbook_config::ApiConfig;
use std::time::Duration;
use tracing::debug;

use crate::error::{config_missing, ApiError, WidgetError};
use crate::http::{error_message, safe_json};

/// Creates a new HTTP client with the given request timeout.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Authenticated JSON client for the booking API.
///
/// Every request carries `Authorization: Bearer <token>`, using the per-call
/// token or, failing that, the static token from configuration. Bodies are
/// read as text and parsed leniently (see [`safe_json`]); non-success
/// statuses become [`ApiError::Status`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    static_token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url`. A trailing `/` is removed.
    pub fn new(
        base_url: &str,
        static_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, WidgetError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(config_missing("api.base_url is not set"));
        }
        let client = create_client(timeout_secs).map_err(ApiError::from)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            static_token,
        })
    }

    /// Creates a client from the `api` configuration section.
    ///
    /// Fails with [`WidgetError::ConfigMissing`] when no base URL is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self, WidgetError> {
        let base_url = config
            .base_url()
            .ok_or_else(|| config_missing("api.base_url is not set"))?;
        Self::new(
            base_url,
            config.static_token().map(str::to_string),
            config.timeout_secs,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn bearer<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token
            .filter(|t| !t.is_empty())
            .or(self.static_token.as_deref())
    }

    /// Sends a GET with `params` as the query string and returns the parsed body.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url).query(params);
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }

        read_response(request.send().await?).await
    }

    /// Sends `body` as JSON in a POST and returns the parsed body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);

        // `json` also sets `Content-Type: application/json`.
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }

        read_response(request.send().await?).await
    }

    /// [`ApiClient::get`] followed by deserialization into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let value = self.get(path, params, token).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// [`ApiClient::post`] followed by deserialization into `T`.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let value = self.post(path, body, token).await?;
        Ok(serde_json::from_value(value)?)
    }
}

async fn read_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    let data = safe_json(&text);
    debug!("Booking API responded {}", status);

    if !status.is_success() {
        return Err(ApiError::Status {
            message: error_message(status.as_u16(), &data),
            status: status.as_u16(),
            details: data,
        });
    }
    Ok(data)
}
