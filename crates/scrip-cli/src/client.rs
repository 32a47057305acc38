//! Async HTTP client wrapping the Scrip record API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use scrip_core::{
  form::RecordForm,
  record::{PrescriptionRecord, RecordId},
};

/// Connection settings for the Scrip API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Scrip REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Any non-2xx
/// response is returned as an error carrying the status and the server's
/// message; nothing is retried.
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
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Turn a non-success response into an error with the server's message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("{what} → {status}: {}", body.trim()))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /data`
  pub async fn list_records(&self) -> Result<Vec<PrescriptionRecord>> {
    let resp = self
      .client
      .get(self.url("/data"))
      .send()
      .await
      .context("GET /data failed")?;
    let resp = Self::check(resp, "GET /data").await?;
    resp.json().await.context("deserialising records")
  }

  /// `GET /data/{id}`
  pub async fn get_record(&self, id: RecordId) -> Result<PrescriptionRecord> {
    let path = format!("/data/{id}");
    let resp = self
      .client
      .get(self.url(&path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    let resp = Self::check(resp, &format!("GET {path}")).await?;
    resp.json().await.context("deserialising record")
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /submit`, asking for the stored record back so its id is known.
  pub async fn submit(&self, form: &RecordForm) -> Result<PrescriptionRecord> {
    let resp = self
      .client
      .post(self.url("/submit"))
      .header("prefer", "return=representation")
      .json(form)
      .send()
      .await
      .context("POST /submit failed")?;
    let resp = Self::check(resp, "POST /submit").await?;
    resp.json().await.context("deserialising submitted record")
  }

  /// `PUT /update/{id}` — full replacement. Returns the server's ack.
  pub async fn update(&self, id: RecordId, form: &RecordForm) -> Result<String> {
    let path = format!("/update/{id}");
    let resp = self
      .client
      .put(self.url(&path))
      .json(form)
      .send()
      .await
      .with_context(|| format!("PUT {path} failed"))?;
    let resp = Self::check(resp, &format!("PUT {path}")).await?;
    resp.text().await.context("reading update response")
  }

  /// `PATCH /update/{id}` — only the fields set in `form` change.
  pub async fn patch(&self, id: RecordId, form: &RecordForm) -> Result<String> {
    let path = format!("/update/{id}");
    let resp = self
      .client
      .patch(self.url(&path))
      .json(form)
      .send()
      .await
      .with_context(|| format!("PATCH {path} failed"))?;
    let resp = Self::check(resp, &format!("PATCH {path}")).await?;
    resp.text().await.context("reading patch response")
  }

  /// `DELETE /delete/{id}`
  pub async fn delete(&self, id: RecordId) -> Result<String> {
    let path = format!("/delete/{id}");
    let resp = self
      .client
      .delete(self.url(&path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    let resp = Self::check(resp, &format!("DELETE {path}")).await?;
    resp.text().await.context("reading delete response")
  }
}
