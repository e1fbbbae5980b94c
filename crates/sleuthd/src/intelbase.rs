//! IntelBase lookup client.
//!
//! One outbound POST per lookup, no retries. The response body is returned
//! as parsed JSON without any shape validation; defensiveness against
//! malformed payloads lives in the normalizer.

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Options for a single lookup call.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub include_data_breaches: bool,
    pub timeout_ms: u64,
    /// Forwarded verbatim when present; omitted from the request otherwise.
    pub exclude_modules: Option<Value>,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            include_data_breaches: true,
            timeout_ms: 5_000,
            exclude_modules: None,
        }
    }
}

/// Lookup client errors
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("IntelBase API key is not configured")]
    Configuration,

    #[error("IntelBase error {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("IntelBase request failed: {0}")]
    Transport(String),
}

/// Client for the IntelBase email lookup endpoint.
pub struct IntelBaseClient {
    api_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl IntelBaseClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            http,
        })
    }

    /// Call the lookup endpoint and return the parsed JSON body.
    pub async fn lookup(&self, email: &str, opts: &LookupOptions) -> Result<Value, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::Configuration);
        }

        let payload = build_payload(email, opts);
        let wait_budget = wait_budget_secs(opts.timeout_ms);
        debug!("IntelBase lookup for {} (wait budget {}s)", email, wait_budget);

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .timeout(Duration::from_secs(wait_budget))
            .json(&payload)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            // Prefer the structured error body; fall back to the raw text.
            let detail = match serde_json::from_str::<Value>(&text) {
                Ok(json) => json.to_string(),
                Err(_) => text,
            };
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))
    }
}

fn build_payload(email: &str, opts: &LookupOptions) -> Value {
    let mut payload = serde_json::json!({
        "email": email,
        "timeout_ms": opts.timeout_ms,
        "include_data_breaches": opts.include_data_breaches,
    });
    if let Some(exclude) = &opts.exclude_modules {
        payload["exclude_modules"] = exclude.clone();
    }
    payload
}

/// Client-side wait budget in seconds; always more generous than the
/// server-side timeout so the two never race.
pub fn wait_budget_secs(timeout_ms: u64) -> u64 {
    std::cmp::max(1, timeout_ms / 1000 + 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wait_budget_adds_cushion() {
        assert_eq!(wait_budget_secs(5_000), 8);
        assert_eq!(wait_budget_secs(999), 3);
        assert_eq!(wait_budget_secs(0), 3);
        assert_eq!(wait_budget_secs(60_000), 63);
    }

    #[test]
    fn test_payload_omits_exclude_modules_by_default() {
        let payload = build_payload("a@b.com", &LookupOptions::default());
        assert_eq!(payload["email"], "a@b.com");
        assert_eq!(payload["timeout_ms"], 5_000);
        assert_eq!(payload["include_data_breaches"], true);
        assert!(payload.get("exclude_modules").is_none());
    }

    #[test]
    fn test_payload_includes_exclude_modules_verbatim() {
        let opts = LookupOptions {
            exclude_modules: Some(json!(["github", "google"])),
            ..LookupOptions::default()
        };
        let payload = build_payload("a@b.com", &opts);
        assert_eq!(payload["exclude_modules"], json!(["github", "google"]));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_network_call() {
        let client = IntelBaseClient::new("http://127.0.0.1:1/lookup", "").unwrap();
        let err = client
            .lookup("a@b.com", &LookupOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Configuration));
        assert_eq!(err.to_string(), "IntelBase API key is not configured");
    }
}
