use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

#[derive(Debug, Clone)]
pub struct HttpText {
    pub status: StatusCode,
    pub body: String,
}

impl HttpText {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Plain GET that hands back the status with the body so callers can surface
/// error bodies verbatim.
pub fn fetch_text(client: &Client, url: &str) -> Result<HttpText> {
    let resp = client
        .get(url)
        .header(USER_AGENT, "dota_lookup")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    Ok(HttpText { status, body })
}
