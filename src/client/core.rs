// File: src/client/core.rs
use crate::config::Config;
use crate::model::{Chore, ChoresPayload};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::json;

/// Why a chores request did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum SkylightError {
    #[error("chores endpoint returned {0}")]
    Status(StatusCode),
    #[error("chores request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the Skylight frame chores API.
///
/// Every request carries the configured token verbatim in `Authorization`,
/// the configured `User-Agent` and `Accept: application/json`.
#[derive(Clone, Debug)]
pub struct SkylightClient {
    http: Client,
    root: String,
    frame_id: String,
}

impl SkylightClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.skylight_token)
                .context("SKYLIGHT_TOKEN is not a valid header value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .context("user_agent is not a valid header value")?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build Skylight HTTP client")?;

        Ok(Self {
            http,
            root: config.api_root().to_string(),
            frame_id: config.frame_id.clone(),
        })
    }

    fn chores_url(&self) -> String {
        format!("{}/api/frames/{}/chores", self.root, self.frame_id)
    }

    fn chore_url(&self, chore_id: &str) -> String {
        format!("{}/{}", self.chores_url(), chore_id)
    }

    /// Fetch the chores scheduled for the local current day, late ones included.
    pub async fn get_todays_chores(&self) -> Result<Vec<Chore>, SkylightError> {
        self.get_chores_for(Local::now().date_naive()).await
    }

    pub async fn get_chores_for(&self, day: NaiveDate) -> Result<Vec<Chore>, SkylightError> {
        let day = day.format("%Y-%m-%d").to_string();
        let resp = self
            .http
            .get(self.chores_url())
            .query(&[
                ("after", day.as_str()),
                ("before", day.as_str()),
                ("include_late", "true"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(SkylightError::Status(status));
        }

        let payload: ChoresPayload = resp.json().await?;
        let chores = payload.into_chores();
        log::debug!("Fetched {} chores for {}", chores.len(), day);
        Ok(chores)
    }

    /// Mark a chore complete. Any 2xx counts as success; a repeat call on an
    /// already complete chore is just another PUT.
    pub async fn complete_chore(&self, chore_id: &str) -> Result<(), SkylightError> {
        let resp = self
            .http
            .put(self.chore_url(chore_id))
            .json(&json!({ "status": "complete" }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SkylightError::Status(status));
        }
        log::info!("Marked chore {} complete", chore_id);
        Ok(())
    }
}
