//! Application configuration.
//!
//! Shared limits and labels live in `claimdesk::config`; this module only
//! holds what the browser dashboard adds on top.

pub use claimdesk::config::{
    BACKEND_URL, CLAIM_DOC_SIZE_HINT_MB, CLAIM_STAGES, STAGE_INTERVAL, WORKSHOP_DOC_SIZE_HINT_MB,
};

/// Application name, shown in the header and page title.
pub const APP_NAME: &str = "Claim Desk";

// Routes
pub const CLAIM_ROUTE: &str = "/";
pub const CLAIM_RESULT_ROUTE: &str = "/claim/result";
pub const WORKSHOP_ROUTE: &str = "/workshop";
pub const POLICY_QA_ROUTE: &str = "/qa";

/// Stage timer period for `gloo_timers`, in milliseconds.
pub fn stage_interval_ms() -> u32 {
    STAGE_INTERVAL.as_millis() as u32
}
