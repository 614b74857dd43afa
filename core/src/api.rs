//! Claims backend request and response types.
//!
//! Responses are decoded leniently: every field the dashboard reads is
//! optional, and values whose shape the backend does not pin down are kept as
//! raw JSON and rendered through [`display_value`].
//!
//! # Endpoints
//!
//! | Method | Path                    | Body            | Response             |
//! |--------|-------------------------|-----------------|----------------------|
//! | POST   | `/process_claim/`       | multipart       | [`ClaimResult`]      |
//! | POST   | `/workshop_suggestion/` | multipart       | [`WorkshopResponse`] |
//! | POST   | `/policy_qa/`           | [`PolicyQuestion`] | [`PolicyAnswer`]  |
//! | GET    | `/health`               |                 | [`HealthStatus`]     |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::PLACEHOLDER;

pub const PROCESS_CLAIM_PATH: &str = "/process_claim/";
pub const WORKSHOP_SUGGESTION_PATH: &str = "/workshop_suggestion/";
pub const POLICY_QA_PATH: &str = "/policy_qa/";
pub const HEALTH_PATH: &str = "/health";

// =============================================================================
// Claim Result
// =============================================================================

/// Outcome reported by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    #[default]
    Failed,
    /// Anything else the backend might send.
    #[serde(other)]
    Other,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Success => write!(f, "success"),
            ResultStatus::Failed => write!(f, "failed"),
            ResultStatus::Other => write!(f, "unknown"),
        }
    }
}

/// Structured analysis block of a claim result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimAnalysis {
    #[serde(default)]
    pub executive_summary: Option<Value>,
    #[serde(default)]
    pub policy_details: Option<Map<String, Value>>,
    #[serde(default)]
    pub claim_details: Option<Map<String, Value>>,
    #[serde(default)]
    pub policy_suggestion: Option<Value>,
    #[serde(default)]
    pub estimated_claim: Option<Value>,
}

impl ClaimAnalysis {
    pub fn executive_summary(&self) -> String {
        display_opt(self.executive_summary.as_ref())
    }

    pub fn policy_suggestion(&self) -> String {
        display_opt(self.policy_suggestion.as_ref())
    }

    pub fn estimated_claim(&self) -> String {
        display_opt(self.estimated_claim.as_ref())
    }

    /// `(label, value)` pairs, in backend order.
    pub fn policy_details(&self) -> Vec<(String, String)> {
        display_map(self.policy_details.as_ref())
    }

    pub fn claim_details(&self) -> Vec<(String, String)> {
        display_map(self.claim_details.as_ref())
    }
}

/// Response of `/process_claim/`, or a synthetic failure built locally.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default)]
    pub analysis: Option<ClaimAnalysis>,
    #[serde(default)]
    pub claims_report: Option<String>,
    #[serde(default)]
    pub table_rows: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl ClaimResult {
    /// Result shown when the claim could not be processed.
    ///
    /// `reason` is logged, not shown: the user gets a single next step.
    pub fn failed(reason: impl fmt::Display) -> Self {
        log::warn!("claim processing failed: {}", reason);
        Self {
            status: ResultStatus::Failed,
            analysis: Some(ClaimAnalysis {
                executive_summary: Some(Value::String("The claim could not be processed.".to_string())),
                policy_suggestion: Some(Value::String(PLACEHOLDER.to_string())),
                estimated_claim: Some(Value::String(PLACEHOLDER.to_string())),
                policy_details: None,
                claim_details: None,
            }),
            claims_report: None,
            table_rows: None,
            next_steps: vec![
                "Check that every document is clear and readable, then submit the claim again.".to_string(),
            ],
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    pub fn analysis(&self) -> ClaimAnalysis {
        self.analysis.clone().unwrap_or_default()
    }

    /// The claims report, if there is a non-blank one.
    pub fn report(&self) -> Option<&str> {
        self.claims_report.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Table of `table_rows`, columns taken from the first row.
    pub fn table(&self) -> Option<TableView> {
        self.table_rows.as_deref().and_then(TableView::from_rows)
    }
}

/// Flat rows laid out for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// `None` when there are no rows. Keys missing from later rows render as
    /// the placeholder; extra keys are ignored.
    pub fn from_rows(rows: &[Map<String, Value>]) -> Option<Self> {
        let first = rows.first()?;
        let columns: Vec<String> = first.keys().cloned().collect();
        let rows = rows
            .iter()
            .map(|row| columns.iter().map(|c| display_opt(row.get(c))).collect())
            .collect();
        Some(Self { columns, rows })
    }
}

// =============================================================================
// Workshop
// =============================================================================

/// Response of `/workshop_suggestion/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkshopResponse {
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default)]
    pub workshop_report: Option<String>,
    #[serde(default)]
    pub analysis: Option<Value>,
}

// =============================================================================
// Policy Q&A
// =============================================================================

/// Identifies one Q&A conversation on the backend.
///
/// Owned by the caller and passed to every question; a fresh id starts a
/// fresh conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new() -> Self {
        Self(format!("insurance-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `/policy_qa/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyQuestion {
    pub question: String,
    pub thread_id: ConversationId,
}

/// Metadata of one retrieved source document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceMetadata {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDoc {
    #[serde(default)]
    pub metadata: EvidenceMetadata,
}

impl EvidenceDoc {
    /// `"policy.pdf (page: 3)"`.
    pub fn citation(&self) -> String {
        let source = self.metadata.source.as_deref().unwrap_or("Unknown");
        let page = self
            .metadata
            .page
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "?".to_string());
        format!("{} (page: {})", source, page)
    }
}

/// Retrieval diagnostics returned next to an answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default)]
    pub answer_confidence: Option<f64>,
    #[serde(default)]
    pub evidence_count: Option<u32>,
    #[serde(default)]
    pub iterations: Option<u32>,
    #[serde(default)]
    pub evidence_docs: Vec<EvidenceDoc>,
}

impl DebugInfo {
    /// Confidence as a percentage with one decimal, e.g. `"87.5%"`.
    pub fn confidence_label(&self) -> String {
        match self.answer_confidence {
            Some(c) => format!("{:.1}%", c * 100.0),
            None => PLACEHOLDER.to_string(),
        }
    }
}

/// Response of `/policy_qa/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub debug_info: Option<DebugInfo>,
}

impl PolicyAnswer {
    /// Answer text replaced by a fixed message, no diagnostics.
    pub fn apology() -> Self {
        Self {
            answer: crate::config::QA_APOLOGY.to_string(),
            debug_info: None,
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// Display helpers
// =============================================================================

/// Human text for an arbitrary JSON value.
///
/// Strings are shown bare, `null` and blank strings as the placeholder,
/// arrays joined with commas, objects as `key: value` pairs.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) if s.trim().is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, display_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn display_opt(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn display_map(map: Option<&Map<String, Value>>) -> Vec<(String, String)> {
    map.map(|m| m.iter().map(|(k, v)| (k.clone(), display_value(v))).collect())
        .unwrap_or_default()
}
