use std::time::Duration;

use async_trait::async_trait;
use devmap_api::models::DeviceFeed;
use reqwest::header;
use serde_json::Value;

use crate::configs::Source;
use crate::errors::RefreshError;

/// Where the refresh cycle reads device rows from.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    async fn fetch(&self) -> Result<DeviceFeed, RefreshError>;
}

/// Device inventory served over HTTP as `{ success, rows }`.
pub struct HttpDeviceSource {
    client: reqwest::Client,
    url: String,
    cookie: Option<String>,
}

impl HttpDeviceSource {
    pub fn new(source: &Source) -> Result<Self, RefreshError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);

        if let Some(timeout_ms) = source.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            client: builder.build()?,
            url: source.url.clone(),
            cookie: source.cookie.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DeviceSource for HttpDeviceSource {
    async fn fetch(&self) -> Result<DeviceFeed, RefreshError> {
        let mut request = self.client.get(&self.url);

        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        tracing::trace!("fetched device feed from {}", self.url);

        Ok(DeviceFeed::from_value(value))
    }
}
