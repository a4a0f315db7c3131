//! Profile lookup over HTTP.
use std::time::Duration;

use async_trait::async_trait;
use dexboard_core::{IdentityLookup, Profile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("profile request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("profile service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("profile response is not valid JSON: {source} (body: {body})")]
    Malformed {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("profile response has an empty name")]
    EmptyName,
}

/// Client for a `GET {base_url}/{uuid}` profile endpoint answering `{ "name": ... }`.
pub struct ProfileLookupClient {
    /// Endpoint without trailing slash
    base_url: String,

    /// HTTP client
    http_client: reqwest::Client,
}

impl ProfileLookupClient {
    /// Create a client; `timeout` bounds each whole request when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dexboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    #[must_use]
    pub fn profile_url(&self, uuid: &str) -> String {
        format!("{}/{}", self.base_url, uuid)
    }
}

#[async_trait]
impl IdentityLookup for ProfileLookupClient {
    type Error = LookupError;

    async fn lookup(&self, uuid: &str) -> Result<Profile, Self::Error> {
        let url = self.profile_url(uuid);
        log::debug!("Fetching profile: {url}");

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        log::debug!("Profile response for {uuid}: {body}");

        let profile: Profile = serde_json::from_str(&body)
            .map_err(|source| LookupError::Malformed { source, body })?;
        if profile.name.trim().is_empty() {
            return Err(LookupError::EmptyName);
        }
        Ok(profile)
    }
}
