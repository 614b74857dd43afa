//! Claim Desk - Frontend Rust/Leptos Application
//!
//! A WebAssembly dashboard for submitting motor insurance claims, comparing
//! workshop quotations and asking questions about a policy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App (Session context)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation, backend status)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /              ClaimPage (DocumentUploader)             │
//! │  ├── /claim/result  ClaimResultPage (StageList, ClaimReport) │
//! │  ├── /workshop      WorkshopPage (WorkshopReportView)        │
//! │  └── /qa            PolicyQaPage                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (BrowserFile, ChatMessage, AppError)
//! - [`components`] - UI components and pages
//! - [`services`] - Backend communication and session state

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    BrowserFile,
    // Chat
    ChatMessage, ChatRole,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Claim Desk - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    Session::provide();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path=CLAIM_ROUTE view=ClaimPage/>
                    <Route path=CLAIM_RESULT_ROUTE view=ClaimResultPage/>
                    <Route path=WORKSHOP_ROUTE view=WorkshopPage/>
                    <Route path=POLICY_QA_ROUTE view=PolicyQaPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
