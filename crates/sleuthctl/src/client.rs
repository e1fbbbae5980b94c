//! HTTP client for talking to a running sleuthd.

use anyhow::{anyhow, Result};
use sleuth_common::api::{HealthResponse, LookupRequest, LookupResponse};
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "http://127.0.0.1:7867";

/// Resolve the daemon address: --addr flag, then SLEUTHD_ADDR, then default.
pub fn resolve_addr(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("SLEUTHD_ADDR").ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

/// Client for communicating with sleuthd
pub struct SleuthdClient {
    addr: String,
    http: reqwest::Client,
}

impl SleuthdClient {
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        // Generous client timeout: the daemon already bounds the upstream
        // call by its own wait budget.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self {
            addr: addr.into(),
            http,
        })
    }

    /// POST a lookup request. Error envelopes (400/500) parse the same way
    /// as success, so callers inspect `ok` rather than the HTTP status.
    pub async fn lookup(&self, req: &LookupRequest) -> Result<LookupResponse> {
        let response = self
            .http
            .post(format!("{}/api/lookup", self.addr))
            .json(req)
            .send()
            .await
            .map_err(|e| connect_error(&self.addr, e))?;

        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/v1/health", self.addr))
            .send()
            .await
            .map_err(|e| connect_error(&self.addr, e))?;

        if !response.status().is_success() {
            return Err(anyhow!("daemon returned HTTP {}", response.status()));
        }
        Ok(response.json().await?)
    }
}

fn connect_error(addr: &str, e: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "Cannot reach sleuthd at {}: {}\n\n\
         Is the daemon running? Start it with:\n\
         sleuthd",
        addr,
        e
    )
}
