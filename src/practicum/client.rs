use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{ConfigError, FetchError};

/// Anything that can answer "what changed since `from_date`?".
#[allow(async_fn_in_trait)]
pub trait HomeworkSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

pub struct PracticumClient {
    token: String,
    client: Client,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String, endpoint: String) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self {
            token,
            client,
            endpoint,
        })
    }
}

impl HomeworkSource for PracticumClient {
    /// One GET against the statuses endpoint. The body is returned unparsed
    /// beyond JSON; shape checks belong to [`check_response`](super::check_response).
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
