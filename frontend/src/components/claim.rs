//! Claim upload page and claim result page.

use claimdesk::{play_stages, StageProgress};
use futures::future::{abortable, AbortHandle};
use gloo_timers::future::IntervalStream;
use leptos::*;
use leptos_router::*;

use crate::components::{ClaimReport, DocumentUploader, Hero, StageList};
use crate::services::Session;
use crate::{stage_interval_ms, CLAIM_DOC_SIZE_HINT_MB, CLAIM_RESULT_ROUTE, CLAIM_ROUTE};

#[component]
pub fn ClaimPage() -> impl IntoView {
    let session = Session::current();
    let documents = session.claim_documents;
    let ready = move || documents.with(|d| d.is_ready());
    let navigate = use_navigate();

    let on_submit = move |_| {
        if ready() {
            navigate(CLAIM_RESULT_ROUTE, Default::default());
        }
    };

    view! {
        <Hero
            title="Submit a Motor Claim"
            subtitle="Upload the required documents and we will analyse your claim against your policy."
        />

        <DocumentUploader documents=documents size_hint_mb=CLAIM_DOC_SIZE_HINT_MB/>

        <div class="submit-row">
            <div class="upload-hint">
                {move || documents.with(|d| d.readiness_message()).unwrap_or_else(|| "All required documents uploaded".to_string())}
            </div>
            <button class="upload-button" disabled=move || !ready() on:click=on_submit>
                "Process Claim"
            </button>
        </div>
    }
}

/// Issues the submission on mount (once per document set) and plays the
/// stages once the result is in.
#[component]
pub fn ClaimResultPage() -> impl IntoView {
    let session = Session::current();
    let ready = session.claim_documents.with_untracked(|d| d.is_ready());
    if ready && session.submit_claim() {
        log::info!("📤 Claim submitted");
    }

    let (progress, set_progress) = create_signal(None::<StageProgress>);
    let stage_timer = store_value(None::<AbortHandle>);

    create_effect(move |_| {
        let has_result = session.claim_result.with(Option::is_some);
        if !has_result || stage_timer.with_value(Option::is_some) {
            return;
        }
        let ticks = IntervalStream::new(stage_interval_ms());
        let (presentation, handle) = abortable(play_stages(StageProgress::claim(), ticks, move |p| {
            set_progress.set(Some(p.clone()))
        }));
        stage_timer.set_value(Some(handle));
        spawn_local(async move {
            let _ = presentation.await;
        });
    });

    on_cleanup(move || {
        if let Some(handle) = stage_timer.get_value() {
            handle.abort();
        }
    });

    let navigate = use_navigate();
    let on_start_over = move |_| {
        session.reset_claim();
        navigate(CLAIM_ROUTE, Default::default());
    };

    let started = create_memo(move |_| progress.with(Option::is_some));
    let finished = move || progress.with(|p| p.as_ref().map(StageProgress::is_complete).unwrap_or(false));

    view! {
        <Hero title="Claim Analysis" subtitle="Your documents are being reviewed."/>

        {move || {
            if !ready {
                return view! {
                    <div class="card">
                        <p>{session.claim_documents.with_untracked(|d| d.readiness_message())}</p>
                        <a href=CLAIM_ROUTE class="upload-button">"Back to documents"</a>
                    </div>
                }
                .into_view();
            }
            if !started.get() {
                return view! {
                    <div class="card loading">"⏳ Analysing your claim, this can take a few minutes..."</div>
                }
                .into_view();
            }
            view! { <StageList progress=Signal::from(progress)/> }.into_view()
        }}

        {move || {
            finished()
                .then(|| session.claim_result.get())
                .flatten()
                .map(|result| view! { <ClaimReport result=result/> })
        }}

        <div class="submit-row">
            <a href=CLAIM_ROUTE class="footer-link">"Edit documents"</a>
            <button class="upload-button" on:click=on_start_over>"Start a new claim"</button>
        </div>
    }
}
