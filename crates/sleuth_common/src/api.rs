//! Request and response envelopes for the sleuthd HTTP API.

use crate::normalize::NormalizedResult;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/lookup`.
///
/// Missing fields take the same defaults the UI form uses; `timeout_ms`
/// falls back to the daemon's configured default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub email: String,

    /// Consent gate - the caller asserts permission to query this address.
    #[serde(default)]
    pub consent: bool,

    #[serde(default = "default_include_data_breaches")]
    pub include_data_breaches: bool,

    /// Server-side lookup timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_include_data_breaches() -> bool {
    true
}

impl Default for LookupRequest {
    fn default() -> Self {
        Self {
            email: String::new(),
            consent: false,
            include_data_breaches: true,
            timeout_ms: None,
        }
    }
}

/// Envelope returned by `POST /api/lookup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<NormalizedResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResponse {
    pub fn success(result: NormalizedResult) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Response of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
