//! # Claim Desk - client core for the insurance claims dashboard
//!
//! Collects claim documents, submits them to the claims backend, plays the
//! staged "analysis" presentation and splits the backend's free-text reports
//! into displayable sections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ DocumentSet │────▶│  Readiness  │────▶│  OneShot    │────▶│   Stages +  │
//! │  (slots)    │     │    gate     │     │  request    │     │  segmenter  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The same core runs in the browser (Leptos frontend, `default-features =
//! false`) and natively (reqwest client and `claimdesk` CLI, `native` feature).
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Defaults and environment configuration
//! - [`accept`] - File type allow-lists
//! - [`slots`] - Document set model and readiness gate
//! - [`request`] - One-shot keyed requests with cancellation
//! - [`stages`] - Cosmetic staged progress
//! - [`segment`] - Report segmentation
//! - [`api`] - Backend request/response types
//! - [`backend`] - Backend trait and per-flow failure policies
//! - [`files`] - Local files for upload
//! - `client` - reqwest client (`native` only)

// Core modules
pub mod error;
pub mod config;

// Documents
pub mod accept;
pub mod slots;
pub mod files;

// Workflow
pub mod request;
pub mod stages;
pub mod segment;

// Backend
pub mod api;
pub mod backend;

#[cfg(feature = "native")]
pub mod client;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CliError, CliResult, ClientError, ClientResult, FileError, SlotError, SlotResult};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{
    ClientConfig, BACKEND_URL, CLAIM_STAGES, MAX_DAMAGED_PHOTOS, PLACEHOLDER, QA_APOLOGY, STAGE_INTERVAL,
};

// =============================================================================
// Re-exports - Documents
// =============================================================================

pub use accept::{mime_for, AllowList, CLAIM_ACCEPT, WORKSHOP_ACCEPT};
pub use files::LocalFile;
pub use slots::{
    DocumentSet, DocumentSlot, FileHandle, SlotKind, SlotSpec, SubmissionKey, CLAIM_LAYOUT, WORKSHOP_LAYOUT,
};

// =============================================================================
// Re-exports - Workflow
// =============================================================================

pub use request::{OneShotRequest, RequestState};
pub use segment::{report_is_incomplete, segment_claims_report, segment_workshop_report, ReportSection, WorkshopReport};
pub use stages::{play_stages, present, StageProgress, StageStatus};

// =============================================================================
// Re-exports - Backend
// =============================================================================

pub use api::{
    display_value, ClaimAnalysis, ClaimResult, ConversationId, DebugInfo, EvidenceDoc, HealthStatus, PolicyAnswer,
    PolicyQuestion, ResultStatus, TableView, WorkshopResponse,
};
pub use backend::{analyze_workshops, ask_policy, submit_claim, ClaimsBackend};

#[cfg(feature = "native")]
pub use client::ClaimsClient;
