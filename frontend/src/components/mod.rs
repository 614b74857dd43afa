//! UI Components for the Claim Desk dashboard.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with backend status
//! - [`Hero`] - Page title and description
//! - [`Footer`] - Page footer
//!
//! # Pages
//! - [`ClaimPage`] - Claim document upload
//! - [`ClaimResultPage`] - Staged claim analysis and result
//! - [`WorkshopPage`] - Workshop quotation comparison
//! - [`PolicyQaPage`] - Policy Q&A chat
//!
//! # Feature Components
//! - [`DocumentUploader`] - Slot uploads with drag & drop
//! - [`StageList`] - Stage progress indicator
//! - [`ClaimReport`] / [`WorkshopReportView`] - Result rendering

mod header;
mod hero;
mod footer;
mod upload;
mod progress;
mod report;
mod claim;
mod workshop;
mod qa;

pub use header::*;
pub use hero::*;
pub use footer::*;
pub use upload::*;
pub use progress::*;
pub use report::*;
pub use claim::*;
pub use workshop::*;
pub use qa::*;
