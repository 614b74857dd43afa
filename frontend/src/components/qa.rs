//! Policy Q&A chat.
//!
//! Every question in the session goes out with the same conversation id so
//! the backend can keep context; "New conversation" starts a fresh one.

use claimdesk::{ask_policy, ClientError, DebugInfo};
use leptos::*;

use crate::components::Hero;
use crate::services::{BrowserBackend, Session};
use crate::types::{ChatMessage, ChatRole};

#[component]
pub fn PolicyQaPage() -> impl IntoView {
    let session = Session::current();
    let (draft, set_draft) = create_signal(String::new());
    let (waiting, set_waiting) = create_signal(false);

    let send = move || {
        let question = draft.get_untracked();
        if question.trim().is_empty() || waiting.get_untracked() {
            return;
        }
        let conversation = session.conversation.get_untracked();
        set_draft.set(String::new());
        set_waiting.set(true);
        session.chat.update(|chat| chat.push(ChatMessage::user(question.trim())));

        spawn_local(async move {
            match ask_policy(&BrowserBackend::default(), &question, &conversation).await {
                Ok(answer) => {
                    session
                        .chat
                        .update(|chat| chat.push(ChatMessage::assistant(answer.answer, answer.debug_info)));
                }
                Err(ClientError::EmptyQuestion) => {}
                Err(e) => log::error!("{}", e),
            }
            set_waiting.set(false);
        });
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <Hero
            title="Policy Q&A"
            subtitle="Ask about your cover, exclusions or the claims process. Answers cite the policy pages they rely on."
        />

        <div class="chat-toolbar">
            <span class="upload-hint">"Conversation " {move || session.conversation.get().to_string()}</span>
            <button class="logs-clear" on:click=move |_| session.new_conversation()>"New conversation"</button>
        </div>

        <div class="chat">
            <For
                each=move || session.chat.get().into_iter().enumerate()
                key=|(i, _)| *i
                children=move |(_, message)| view! { <ChatBubble message=message/> }
            />
            <Show when=move || waiting.get() fallback=|| view! {}>
                <div class="chat-bubble assistant loading">"⏳ Searching the policy..."</div>
            </Show>
        </div>

        <div class="chat-input">
            <textarea
                placeholder="e.g. Is windscreen damage covered?"
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button class="upload-button" disabled=move || waiting.get() on:click=move |_| send()>
                "Ask"
            </button>
        </div>
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> impl IntoView {
    let class_name = match message.role {
        ChatRole::User => "chat-bubble user",
        ChatRole::Assistant => "chat-bubble assistant",
    };

    view! {
        <div class=class_name>
            <span class="log-time">"[" {message.timestamp} "] "</span>
            <p class="pre-line">{message.text}</p>
            {message.debug.map(|debug| view! { <DebugPanel debug=debug/> })}
        </div>
    }
}

/// Retrieval diagnostics under an answer.
#[component]
fn DebugPanel(debug: DebugInfo) -> impl IntoView {
    let count = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_else(|| "—".to_string());

    view! {
        <details class="debug-info">
            <summary>"Details"</summary>
            <div class="metric-row">
                <div class="metric">
                    <span class="metric-label">"Confidence"</span>
                    <span class="metric-value">{debug.confidence_label()}</span>
                </div>
                <div class="metric">
                    <span class="metric-label">"Evidence"</span>
                    <span class="metric-value">{count(debug.evidence_count)}</span>
                </div>
                <div class="metric">
                    <span class="metric-label">"Iterations"</span>
                    <span class="metric-value">{count(debug.iterations)}</span>
                </div>
            </div>
            {(!debug.evidence_docs.is_empty()).then(|| view! {
                <ul class="sources">
                    {debug.evidence_docs.iter().map(|doc| view! { <li>"📎 " {doc.citation()}</li> }).collect_view()}
                </ul>
            })}
        </details>
    }
}
