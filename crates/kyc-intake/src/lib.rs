//! kyc-intake
//!
//! Adapters that accept a finished application: an HTTP client for the
//! intake endpoint and a local outbox for offline use.

pub mod http;
pub mod outbox;

pub use http::HttpIntakeClient;
pub use outbox::{OutboxIntake, OutboxRecord};
