//! Workshop quotation comparison page.

use claimdesk::{analyze_workshops, segment_workshop_report, WorkshopReport};
use leptos::*;

use crate::components::{DocumentUploader, Hero, WorkshopReportView};
use crate::services::{BrowserBackend, Session};
use crate::types::AppError;
use crate::WORKSHOP_DOC_SIZE_HINT_MB;

#[component]
pub fn WorkshopPage() -> impl IntoView {
    let session = Session::current();
    let documents = session.workshop_documents;
    let (busy, set_busy) = create_signal(false);
    let (report, set_report) = create_signal(None::<(WorkshopReport, String)>);

    let ready = move || documents.with(|d| d.is_ready());

    let on_analyze = move |_| {
        if busy.get_untracked() {
            return;
        }
        let quotes = documents.get_untracked();
        set_busy.set(true);
        set_report.set(None);

        spawn_local(async move {
            log::info!("🔧 Comparing {} workshop quotations", quotes.file_count());
            match analyze_workshops(&BrowserBackend::default(), &quotes).await {
                Ok(response) => {
                    let raw = response.workshop_report.unwrap_or_default();
                    set_report.set(Some((segment_workshop_report(&raw), raw)));
                }
                Err(e) => {
                    let err = AppError::from(e);
                    log::error!("❌ Workshop analysis failed: {}", err);
                    alert(&err.to_string());
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <Hero
            title="Compare Workshops"
            subtitle="Upload three repair quotations and get a side-by-side comparison with a recommendation."
        />

        <DocumentUploader documents=documents size_hint_mb=WORKSHOP_DOC_SIZE_HINT_MB/>

        <div class="submit-row">
            <div class="upload-hint">
                {move || documents.with(|d| d.readiness_message()).unwrap_or_default()}
            </div>
            <button class="upload-button" disabled=move || busy.get() || !ready() on:click=on_analyze>
                {move || if busy.get() { "⏳ Analysing quotations..." } else { "Analyse Workshops" }}
            </button>
        </div>

        {move || report.get().map(|(report, raw)| view! { <WorkshopReportView report=report raw=raw/> })}
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
