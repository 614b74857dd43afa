//! Native HTTP client for the claims backend.
//!
//! ```rust,ignore
//! use claimdesk::{ClaimsClient, ClientConfig, DocumentSet, LocalFile, submit_claim};
//!
//! let client = ClaimsClient::new(ClientConfig::from_env()?)?;
//! let mut documents = DocumentSet::<LocalFile>::claim();
//! // ... add files ...
//! let result = submit_claim(&client, &documents).await;
//! ```

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::api::{
    ClaimResult, HealthStatus, PolicyAnswer, PolicyQuestion, WorkshopResponse, HEALTH_PATH, POLICY_QA_PATH,
    PROCESS_CLAIM_PATH, WORKSHOP_SUGGESTION_PATH,
};
use crate::backend::ClaimsBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::files::LocalFile;
use crate::slots::{DocumentSet, FileHandle};

/// reqwest-backed [`ClaimsBackend`].
#[derive(Clone)]
pub struct ClaimsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ClaimsClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One part per file, field name = slot id.
    fn form(documents: &DocumentSet<LocalFile>) -> ClientResult<Form> {
        let mut form = Form::new();
        for (field, file) in documents.parts() {
            let part = Part::bytes(file.bytes().to_vec())
                .file_name(file.name())
                .mime_str(file.mime())
                .map_err(|e| ClientError::Transport(format!("Invalid MIME type for {}: {}", file.name(), e)))?;
            form = form.part(field, part);
        }
        Ok(form)
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> ClientResult<T> {
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);
        let response = self.http.post(&url).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl ClaimsBackend for ClaimsClient {
    type File = LocalFile;

    async fn process_claim(&self, documents: &DocumentSet<LocalFile>) -> ClientResult<ClaimResult> {
        let form = Self::form(documents)?;
        self.post_form(PROCESS_CLAIM_PATH, form).await
    }

    async fn workshop_suggestion(&self, documents: &DocumentSet<LocalFile>) -> ClientResult<WorkshopResponse> {
        let form = Self::form(documents)?;
        self.post_form(WORKSHOP_SUGGESTION_PATH, form).await
    }

    async fn policy_qa(&self, question: &PolicyQuestion) -> ClientResult<PolicyAnswer> {
        let url = self.config.endpoint(POLICY_QA_PATH);
        log::debug!("POST {} (thread {})", url, question.thread_id);
        let response = self.http.post(&url).json(question).send().await?;
        Self::decode(response).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.config.endpoint(HEALTH_PATH);
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }
}
