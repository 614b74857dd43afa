//! The claims backend seam and the per-flow failure policies on top of it.
//!
//! [`ClaimsBackend`] is the raw transport: it reports every failure as a
//! [`ClientError`]. The free functions below decide what each screen does
//! with those failures:
//!
//! | Flow      | On failure                                         |
//! |-----------|----------------------------------------------------|
//! | Claim     | synthetic [`ClaimResult::failed`], always renders  |
//! | Workshop  | `Err`, shown as an alert, action stays enabled     |
//! | Q&A       | answer replaced by [`PolicyAnswer::apology`]       |
//!
//! Nothing is retried automatically.

#![allow(async_fn_in_trait)]

use crate::api::{ClaimResult, ConversationId, HealthStatus, PolicyAnswer, PolicyQuestion, ResultStatus, WorkshopResponse};
use crate::error::{ClientError, ClientResult};
use crate::slots::{DocumentSet, FileHandle};

/// Transport to the claims backend.
///
/// Implemented natively with reqwest ([`crate::client::ClaimsClient`]) and in
/// the browser with gloo-net.
pub trait ClaimsBackend {
    type File: FileHandle;

    /// `POST /process_claim/`, one multipart part per file keyed by slot id.
    async fn process_claim(&self, documents: &DocumentSet<Self::File>) -> ClientResult<ClaimResult>;

    /// `POST /workshop_suggestion/` with parts `workshop1..3`.
    async fn workshop_suggestion(&self, documents: &DocumentSet<Self::File>) -> ClientResult<WorkshopResponse>;

    /// `POST /policy_qa/`.
    async fn policy_qa(&self, question: &PolicyQuestion) -> ClientResult<PolicyAnswer>;

    /// `GET /health`.
    async fn health(&self) -> ClientResult<HealthStatus>;
}

/// Submit a claim. Never fails: any error becomes a failed result.
pub async fn submit_claim<B: ClaimsBackend>(backend: &B, documents: &DocumentSet<B::File>) -> ClaimResult {
    if !documents.is_ready() {
        return ClaimResult::failed(ClientError::NotReady {
            remaining: documents.remaining_required_count(),
        });
    }

    log::info!("submitting claim with {} file(s)", documents.file_count());
    match backend.process_claim(documents).await {
        Ok(result) => {
            log::info!("claim processed: status={}", result.status);
            result
        }
        Err(e) => ClaimResult::failed(e),
    }
}

/// Run the workshop comparison.
///
/// Succeeds only with `status: success` and a non-blank report.
pub async fn analyze_workshops<B: ClaimsBackend>(
    backend: &B,
    documents: &DocumentSet<B::File>,
) -> ClientResult<WorkshopResponse> {
    if !documents.is_ready() {
        return Err(ClientError::NotReady {
            remaining: documents.remaining_required_count(),
        });
    }

    let response = backend.workshop_suggestion(documents).await?;
    let has_report = response
        .workshop_report
        .as_deref()
        .map(|r| !r.trim().is_empty())
        .unwrap_or(false);

    if response.status != ResultStatus::Success || !has_report {
        log::warn!("workshop analysis returned status={} report={}", response.status, has_report);
        return Err(ClientError::Rejected(
            "No valid workshop report received from the backend. Please try again.".to_string(),
        ));
    }
    Ok(response)
}

/// Ask a policy question within `conversation`.
///
/// Only a blank question is an error; backend failures and empty answers
/// come back as the apology answer.
pub async fn ask_policy<B: ClaimsBackend>(
    backend: &B,
    question: &str,
    conversation: &ConversationId,
) -> ClientResult<PolicyAnswer> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ClientError::EmptyQuestion);
    }

    let request = PolicyQuestion {
        question: question.to_string(),
        thread_id: conversation.clone(),
    };
    match backend.policy_qa(&request).await {
        Ok(answer) if !answer.answer.trim().is_empty() => Ok(answer),
        Ok(_) => {
            log::warn!("policy Q&A returned an empty answer");
            Ok(PolicyAnswer::apology())
        }
        Err(e) => {
            log::warn!("policy Q&A failed: {}", e);
            Ok(PolicyAnswer::apology())
        }
    }
}
