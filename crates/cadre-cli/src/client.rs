//! Async HTTP client wrapping the directory JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use cadre_core::person::Person;
use reqwest::Client;

/// Connection settings for the directory API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the directory JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// `GET /api/persons/{id}`
  ///
  /// The identifier is forwarded as-is; validating it is the server's
  /// concern, and a malformed one simply comes back as an error status.
  pub async fn person_by_id(&self, id: &str) -> Result<Person> {
    let resp = self
      .auth(self.client.get(self.url(&format!("/persons/{id}"))))
      .send()
      .await
      .context("GET /persons failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /persons/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising person")
  }
}
