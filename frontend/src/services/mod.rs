//! Backend services.
//!
//! # Services
//!
//! - [`claims`] - Claims backend over gloo-net (claim, workshop, Q&A, health)
//! - [`session`] - Per-tab state shared by the pages

pub mod claims;
pub mod session;

pub use claims::*;
pub use session::*;
