//! Thin HTTP layer behind the [`HttpClient`] trait.

mod basic;
mod bearer;
mod client;

pub use basic::BasicClient;
pub use bearer::Bearer;
pub use client::HttpClient;

use anyhow::{Result, bail};

/// Issues a GET for `url` and decodes the response body as JSON.
///
/// Non-2xx statuses are turned into errors carrying the status and body,
/// so callers can surface what the remote service actually said.
pub async fn fetch_json<C: HttpClient>(client: &C, url: &str) -> Result<serde_json::Value> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("request failed with status {status}: {body}");
    }

    Ok(resp.json().await?)
}
