use claimdesk::ClaimsBackend;
use leptos::*;
use leptos_router::*;

use crate::services::BrowserBackend;
use crate::{APP_NAME, CLAIM_ROUTE, POLICY_QA_ROUTE, WORKSHOP_ROUTE};

#[component]
pub fn Header() -> impl IntoView {
    // None until the first health check answers
    let (online, set_online) = create_signal(None::<bool>);

    spawn_local(async move {
        match BrowserBackend::default().health().await {
            Ok(health) => {
                log::info!("✅ Backend status: {}", health.status);
                set_online.set(Some(true));
            }
            Err(e) => {
                log::warn!("Backend unreachable: {}", e);
                set_online.set(Some(false));
            }
        }
    });

    view! {
        <header>
            <div class="header-left">
                <a href=CLAIM_ROUTE class="logo">{APP_NAME}</a>
                <nav class="nav">
                    <A href=CLAIM_ROUTE exact=true>"Claim"</A>
                    <A href=WORKSHOP_ROUTE>"Workshops"</A>
                    <A href=POLICY_QA_ROUTE>"Policy Q&A"</A>
                </nav>
            </div>
            <div class="header-right">
                <div class="backend-status" class:connected=move || online.get() == Some(true)>
                    <span class="status-dot" class:connected=move || online.get() == Some(true)></span>
                    <span>
                        {move || match online.get() {
                            None => "Checking backend...",
                            Some(true) => "Backend online",
                            Some(false) => "Backend offline",
                        }}
                    </span>
                </div>
            </div>
        </header>
    }
}
