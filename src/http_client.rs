use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;

// Upper bound for any request; callers pass tighter per-request timeouts.
const CLIENT_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 3;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Status and body of a completed request. Non-2xx statuses are not errors
/// here; the caller decides what they mean.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("squadmind/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")
    })
}

/// GET `url` with query pairs. Transport and body-read failures are errors;
/// any HTTP status comes back as a reply.
pub fn get_with_query(url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<HttpReply> {
    let resp = http_client()?
        .get(url)
        .query(query)
        .timeout(timeout)
        .send()
        .with_context(|| format!("request {url}"))?;
    let status = resp.status();
    let body = resp
        .text()
        .with_context(|| format!("read body from {url}"))?;
    Ok(HttpReply { status, body })
}
