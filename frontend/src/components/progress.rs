use claimdesk::{StageProgress, StageStatus};
use leptos::*;

/// Stage labels with a progress bar, driven by a [`StageProgress`] signal.
#[component]
pub fn StageList(progress: Signal<Option<StageProgress>>) -> impl IntoView {
    let percent = move || {
        progress
            .get()
            .map(|p| (p.fraction() * 100.0).round() as u32)
            .unwrap_or(0)
    };

    view! {
        <div class="progress-section show">
            <div class="progress-bar">
                <div class="progress-fill" style=move || format!("width: {}%;", percent())></div>
            </div>
            <div class="logs">
                {move || {
                    progress
                        .get()
                        .map(|p| {
                            p.labels()
                                .iter()
                                .enumerate()
                                .map(|(i, label)| {
                                    let (class_name, marker) = match p.status_of(i) {
                                        StageStatus::Done => ("log-entry success", "✅"),
                                        StageStatus::Active => ("log-entry info", "⏳"),
                                        StageStatus::Pending => ("log-entry pending", "○"),
                                    };
                                    view! { <div class=class_name>{marker} " " {*label}</div> }
                                })
                                .collect_view()
                        })
                }}
            </div>
        </div>
    }
}
