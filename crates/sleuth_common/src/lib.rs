//! Shared types for mailsleuth - wire envelopes and the response normalizer.

pub mod api;
pub mod normalize;

pub use api::{HealthResponse, LookupRequest, LookupResponse};
pub use normalize::{normalize, BreachSummary, Card, CardField, NormalizedResult};
