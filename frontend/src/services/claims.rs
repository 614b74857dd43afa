//! HTTP service for the claims backend, over gloo-net.

use claimdesk::api::{HEALTH_PATH, POLICY_QA_PATH, PROCESS_CLAIM_PATH, WORKSHOP_SUGGESTION_PATH};
use claimdesk::config::endpoint;
use claimdesk::{
    ClaimResult, ClaimsBackend, ClientError, ClientResult, DocumentSet, FileHandle, HealthStatus, PolicyAnswer,
    PolicyQuestion, WorkshopResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

use crate::types::BrowserFile;
use crate::BACKEND_URL;

/// Browser [`ClaimsBackend`].
#[derive(Clone, Debug)]
pub struct BrowserBackend {
    base_url: String,
}

impl Default for BrowserBackend {
    fn default() -> Self {
        Self::new(BACKEND_URL)
    }
}

impl BrowserBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// One form entry per file, field name = slot id.
    fn form(documents: &DocumentSet<BrowserFile>) -> ClientResult<FormData> {
        let form = FormData::new().map_err(|e| ClientError::Transport(format!("Failed to create FormData: {:?}", e)))?;
        for (field, file) in documents.parts() {
            form.append_with_blob_and_filename(field, file.as_blob(), &file.name())
                .map_err(|e| ClientError::Transport(format!("Failed to append {}: {:?}", file.name(), e)))?;
        }
        Ok(form)
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: FormData) -> ClientResult<T> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let request = Request::post(&url)
            .body(form)
            .map_err(|e| ClientError::Transport(format!("Failed to build request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("HTTP request failed: {}", e)))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.ok() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::Status {
            status: response.status(),
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("Failed to read response: {}", e)))?;
    Ok(serde_json::from_str(&text)?)
}

impl ClaimsBackend for BrowserBackend {
    type File = BrowserFile;

    async fn process_claim(&self, documents: &DocumentSet<BrowserFile>) -> ClientResult<ClaimResult> {
        let form = Self::form(documents)?;
        self.post_form(PROCESS_CLAIM_PATH, form).await
    }

    async fn workshop_suggestion(&self, documents: &DocumentSet<BrowserFile>) -> ClientResult<WorkshopResponse> {
        let form = Self::form(documents)?;
        self.post_form(WORKSHOP_SUGGESTION_PATH, form).await
    }

    async fn policy_qa(&self, question: &PolicyQuestion) -> ClientResult<PolicyAnswer> {
        let url = self.url(POLICY_QA_PATH);
        log::debug!("POST {} (thread {})", url, question.thread_id);
        let request = Request::post(&url)
            .json(question)
            .map_err(|e| ClientError::Transport(format!("Failed to build request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("HTTP request failed: {}", e)))?;
        decode(response).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let response = Request::get(&self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("HTTP request failed: {}", e)))?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let backend = BrowserBackend::new("http://claims.local:8000/");
        assert_eq!(backend.url(PROCESS_CLAIM_PATH), "http://claims.local:8000/process_claim/");
        assert_eq!(backend.url(HEALTH_PATH), "http://claims.local:8000/health");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "status": "success",
            "analysis": {
                "executive_summary": "Front bumper and headlight damage.",
                "policy_details": {"Policy Number": "POL-88", "Expiry": "2025-01-31"},
                "estimated_claim": "AED 6,300"
            },
            "claims_report": "Report\nDamage: front bumper",
            "next_steps": ["Visit an approved workshop"]
        }"#;

        let result: ClaimResult = serde_json::from_str(json).unwrap();
        assert!(result.is_success());
        assert_eq!(result.analysis().estimated_claim(), "AED 6,300");
        assert_eq!(result.analysis().policy_details()[1].0, "Expiry");
        assert!(result.table().is_none());
    }
}
