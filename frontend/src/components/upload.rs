//! Document upload with drag & drop support.
//!
//! Each slot gets a drop zone and a hidden file input. Both paths go through
//! [`offer_files`], so the allow-list and the slot limits apply the same way.

use claimdesk::{DocumentSet, FileHandle, SlotKind};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::types::{files_from_list, format_size, BrowserFile};

/// Filter `files` through the slot's allow-list and add what passes.
///
/// Returns the names of rejected files.
pub fn offer_files(
    documents: RwSignal<DocumentSet<BrowserFile>>,
    slot_id: &'static str,
    files: Vec<BrowserFile>,
) -> Vec<String> {
    let Some(accept) = documents.with_untracked(|d| d.slot(slot_id).map(|s| s.accept())) else {
        log::error!("no slot '{}' in this document set", slot_id);
        return Vec::new();
    };

    let (accepted, rejected) = accept.partition(files);
    if !accepted.is_empty() {
        documents.update(|d| match d.add_files(slot_id, accepted) {
            Ok(held) => log::info!("📎 {}: {} file(s)", slot_id, held),
            Err(e) => log::error!("{}", e),
        });
    }
    rejected.iter().map(|f| f.name()).collect()
}

/// All slots of a document set.
#[component]
pub fn DocumentUploader(
    documents: RwSignal<DocumentSet<BrowserFile>>,
    /// Guidance only, never enforced
    size_hint_mb: u32,
) -> impl IntoView {
    let slot_ids: Vec<&'static str> = documents.with_untracked(|d| d.slots().iter().map(|s| s.id()).collect());

    view! {
        <div class="document-grid">
            {slot_ids
                .into_iter()
                .map(|slot_id| view! { <SlotCard documents=documents slot_id=slot_id size_hint_mb=size_hint_mb/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn SlotCard(documents: RwSignal<DocumentSet<BrowserFile>>, slot_id: &'static str, size_hint_mb: u32) -> impl IntoView {
    let Some((name, description, required, kind, accept_attr)) = documents.with_untracked(|d| {
        d.slot(slot_id)
            .map(|s| (s.name(), s.description(), s.required(), s.kind(), s.accept().accept_attr()))
    }) else {
        return view! { <div class="upload-section error-message">"Unknown document slot"</div> }.into_view();
    };
    let multiple = matches!(kind, SlotKind::Multi { .. });
    let accept_label = accept_attr.clone();
    let input_id = format!("file-{}", slot_id);

    let (dragging, set_dragging) = create_signal(false);
    let (rejected, set_rejected) = create_signal(Vec::<String>::new());

    let uploaded = move || documents.with(|d| d.slot(slot_id).map(|s| s.uploaded()).unwrap_or(false));
    let files = move || {
        documents.with(|d| {
            d.slot(slot_id)
                .map(|s| s.files().iter().map(|f| (f.name(), f.size())).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    let offer = move |list: Option<web_sys::FileList>| {
        set_rejected.set(offer_files(documents, slot_id, files_from_list(list)));
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        offer(input.files());
        // Lets the same file be picked again after removal.
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        offer(ev.data_transfer().and_then(|dt| dt.files()));
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let trigger_input_id = input_id.clone();
    let trigger_file_input = move |_| {
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&trigger_input_id))
        {
            if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                html_input.click();
            }
        }
    };

    let remove = move |index: usize| {
        documents.update(|d| {
            let index = multiple.then_some(index);
            if let Err(e) = d.remove_file(slot_id, index) {
                log::error!("{}", e);
            }
        });
    };

    let limit_hint = match kind {
        SlotKind::Single => format!("1 file, up to {} MB", size_hint_mb),
        SlotKind::Multi { max } => format!("Up to {} files, {} MB each", max, size_hint_mb),
    };

    view! {
        <div
            class="upload-section"
            class:dragging=move || dragging.get()
            class:uploaded=uploaded
            on:dragover=on_drag_over
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <div class="slot-header">
                <span class="upload-icon">{move || if uploaded() { "✅" } else { "📄" }}</span>
                <span class="slot-name">{name}</span>
                {(!required).then(|| view! { <span class="badge">"Optional"</span> })}
            </div>
            <div class="upload-hint">{description}</div>

            <div class="upload-zone" on:click=trigger_file_input>
                <div class="upload-text">"Drag files here or click to browse"</div>
                <div class="upload-hint">{accept_label} " · " {limit_hint}</div>
            </div>

            <input
                type="file"
                id=input_id
                accept=accept_attr
                multiple=multiple
                style="display:none"
                on:change=on_file_change
            />

            <Show when=move || !rejected.get().is_empty() fallback=|| view! {}>
                <div class="error-message">
                    "Not accepted: " {move || rejected.get().join(", ")}
                </div>
            </Show>

            <ul class="file-list">
                <For
                    each=move || files().into_iter().enumerate()
                    key=|(i, (name, size))| (*i, name.clone(), *size)
                    children=move |(i, (name, size))| {
                        view! {
                            <li class="file-entry">
                                <span class="file-name">{name}</span>
                                <span class="file-size">{format_size(size)}</span>
                                <button class="file-remove" on:click=move |_| remove(i)>"✕"</button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
    .into_view()
}
