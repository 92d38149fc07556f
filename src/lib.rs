#![doc(test(attr(deny(warnings))))]

//! Safari application wizard: a resumable, step-validated terminal flow that
//! collects a guest's details and submits them to the operator's intake
//! service.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("safari-kyc tracing initialized");
    });
}
