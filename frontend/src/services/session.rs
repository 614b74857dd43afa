//! Per-tab dashboard state, provided as context by [`crate::App`].
//!
//! Nothing here is persisted; a reload starts from empty document sets and a
//! fresh conversation.

use claimdesk::{submit_claim, ClaimResult, ConversationId, DocumentSet, OneShotRequest, SubmissionKey};
use futures::future::Aborted;
use leptos::*;

use crate::services::BrowserBackend;
use crate::types::{BrowserFile, ChatMessage};

#[derive(Clone, Copy)]
pub struct Session {
    pub claim_documents: RwSignal<DocumentSet<BrowserFile>>,
    pub claim_request: StoredValue<OneShotRequest<SubmissionKey, ClaimResult>>,
    /// Result for the most recently issued claim submission.
    pub claim_result: RwSignal<Option<ClaimResult>>,
    pub workshop_documents: RwSignal<DocumentSet<BrowserFile>>,
    pub conversation: RwSignal<ConversationId>,
    pub chat: RwSignal<Vec<ChatMessage>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            claim_documents: create_rw_signal(DocumentSet::claim()),
            claim_request: store_value(OneShotRequest::new()),
            claim_result: create_rw_signal(None),
            workshop_documents: create_rw_signal(DocumentSet::workshop()),
            conversation: create_rw_signal(ConversationId::new()),
            chat: create_rw_signal(Vec::new()),
        }
    }

    pub fn provide() {
        provide_context(Self::new());
    }

    pub fn current() -> Self {
        expect_context::<Self>()
    }

    /// Submit the claim documents unless this exact set was already sent.
    ///
    /// Returns whether a new request went out.
    pub fn submit_claim(&self) -> bool {
        let documents = self.claim_documents.get_untracked();
        if !documents.is_ready() {
            return false;
        }
        let key = documents.submission_key();
        let backend = BrowserBackend::default();

        let issued = self
            .claim_request
            .try_update_value(|request| {
                request.issue(key.clone(), move || async move { submit_claim(&backend, &documents).await })
            })
            .flatten();
        let Some(future) = issued else {
            return false;
        };

        self.claim_result.set(None);
        let session = *self;
        spawn_local(async move {
            match future.await {
                Ok(result) => {
                    let current = session
                        .claim_request
                        .try_update_value(|request| request.resolve(&key, result.clone()))
                        .unwrap_or(false);
                    if current {
                        session.claim_result.set(Some(result));
                    }
                }
                Err(Aborted) => log::debug!("claim submission superseded"),
            }
        });
        true
    }

    /// Drop the claim documents and any submitted result.
    pub fn reset_claim(&self) {
        self.claim_request.update_value(|request| request.reset());
        self.claim_result.set(None);
        self.claim_documents.update(|documents| documents.clear());
    }

    /// Start a new Q&A thread.
    pub fn new_conversation(&self) {
        self.conversation.set(ConversationId::new());
        self.chat.set(Vec::new());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
