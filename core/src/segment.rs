//! Splits backend free-text reports into titled sections for display.
//!
//! Two grammars, one per report type. Both are lossy on purpose: text that
//! does not fit the expected shape is dropped rather than guessed at.
//!
//! # Claims report
//!
//! ```text
//! # Claim Report            <- preamble, dropped
//! Policy Suggestion: Gold   <- heading "Policy Suggestion", body "Gold"
//! ## Executive Summary:     <- '#' stripped, heading "Executive Summary"
//! The claim concerns ...    <- body
//! ```
//!
//! A heading line starts with an ASCII letter or a space and contains a
//! colon. The first section is always dropped.
//!
//! # Workshop report
//!
//! ```text
//! ## Workshop 1 Analysis:   <- workshop card
//! ## Comparison:            <- comparison block
//! ## Suggested Workshop:    <- suggestion block
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)markdown").expect("valid markdown-word regex"));

static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*").expect("valid heading-marker regex"));

/// Marker the workshop report is split on.
const WORKSHOP_SPLIT: &str = "## ";

/// A titled block of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

impl ReportSection {
    fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Workshop report split into cards and summary blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopReport {
    /// One per `Workshop...` section, in report order.
    pub workshops: Vec<ReportSection>,
    /// Body of the first section whose title mentions "comparison".
    pub comparison: Option<String>,
    /// Body of the first section whose title mentions "suggested".
    pub suggestion: Option<String>,
}

impl WorkshopReport {
    pub fn is_empty(&self) -> bool {
        self.workshops.is_empty() && self.comparison.is_none() && self.suggestion.is_none()
    }
}

// =============================================================================
// Claims report
// =============================================================================

/// Split a claims report into heading/body sections.
pub fn segment_claims_report(text: &str) -> Vec<ReportSection> {
    let cleaned = MARKDOWN_WORD.replace_all(text, "");
    let cleaned = HEADING_MARKER.replace_all(&cleaned, "");

    let mut sections: Vec<Vec<&str>> = Vec::new();
    for line in cleaned.lines() {
        match sections.last_mut() {
            Some(current) if !is_heading_line(line) => current.push(line),
            _ => sections.push(vec![line]),
        }
    }

    sections
        .into_iter()
        .skip(1)
        .map(|lines| {
            let (heading, inline) = split_title(lines[0]);
            let mut body: Vec<&str> = Vec::with_capacity(lines.len());
            if !inline.is_empty() {
                body.push(inline);
            }
            body.extend(&lines[1..]);
            ReportSection::new(heading, body.join("\n").trim())
        })
        .collect()
}

fn is_heading_line(line: &str) -> bool {
    let starts_ok = line
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == ' ')
        .unwrap_or(false);
    starts_ok && line.contains(':')
}

/// `"Title: rest"` -> `("Title", "rest")`; no colon -> `(line, "")`.
fn split_title(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((title, rest)) => (title.trim(), rest.trim()),
        None => (line.trim(), ""),
    }
}

// =============================================================================
// Workshop report
// =============================================================================

/// Split a workshop report into workshop cards, comparison and suggestion.
///
/// Titles starting with `Workshop` become cards. Otherwise a title containing
/// "comparison" fills the comparison block and one containing "suggested"
/// fills the suggestion block (case-insensitive, first match wins). Anything
/// else is dropped.
pub fn segment_workshop_report(text: &str) -> WorkshopReport {
    let mut report = WorkshopReport::default();

    for fragment in text.split(WORKSHOP_SPLIT).map(str::trim).filter(|f| !f.is_empty()) {
        let (first, rest) = fragment.split_once('\n').unwrap_or((fragment, ""));
        let (title, inline) = split_title(first);
        let body = [inline, rest.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let lowered = title.to_lowercase();
        if title.starts_with("Workshop") {
            report.workshops.push(ReportSection::new(title, body));
        } else if lowered.contains("comparison") {
            report.comparison.get_or_insert(body);
        } else if lowered.contains("suggested") {
            report.suggestion.get_or_insert(body);
        } else {
            log::debug!("dropping unrecognised workshop section '{}'", title);
        }
    }

    report
}

/// Backend fills unknown fields with these markers when extraction fails.
pub fn report_is_incomplete(text: &str) -> bool {
    text.contains("Unknown") || text.contains("Insufficient data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_basic_example() {
        let sections = segment_claims_report("# Title\nSummary:\nfoo bar\nDetails:\nbaz");
        assert_eq!(
            sections,
            vec![ReportSection::new("Summary", "foo bar"), ReportSection::new("Details", "baz")]
        );
    }

    #[test]
    fn test_claims_strips_markdown_word_and_markers() {
        let text = "```Markdown\n---\nPolicy Suggestion: Comprehensive cover\n## Executive Summary:\nRear-end collision.\nMinor damage.\n### Risk Analysis:\n- low risk";
        let sections = segment_claims_report(text);
        assert_eq!(
            sections,
            vec![
                ReportSection::new("Policy Suggestion", "Comprehensive cover"),
                ReportSection::new("Executive Summary", "Rear-end collision.\nMinor damage."),
                ReportSection::new("Risk Analysis", "- low risk"),
            ]
        );
    }

    #[test]
    fn test_claims_first_section_dropped_even_if_heading() {
        let sections = segment_claims_report("Summary:\nfoo\nDetails:\nbaz");
        assert_eq!(sections, vec![ReportSection::new("Details", "baz")]);
    }

    #[test]
    fn test_claims_table_and_bullets_stay_in_body() {
        let text = "intro\nClaim Details Table:\n| Claim ID | Status |\n|---|---|\n| 42 | Open |\n- note: kept";
        let sections = segment_claims_report(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Claim Details Table");
        assert_eq!(sections[0].body, "| Claim ID | Status |\n|---|---|\n| 42 | Open |\n- note: kept");
    }

    #[test]
    fn test_claims_indented_fallback_report() {
        let text = "\n            ---\n            Estimated Claim: Unknown\n\n            ## Executive Summary:\n            Manual review required.\n";
        let sections = segment_claims_report(text);
        assert_eq!(sections[0], ReportSection::new("Estimated Claim", "Unknown"));
        assert_eq!(sections[1], ReportSection::new("Executive Summary", "Manual review required."));
    }

    #[test]
    fn test_claims_empty_and_headingless() {
        assert!(segment_claims_report("").is_empty());
        assert!(segment_claims_report("just a paragraph\nwith no headings").is_empty());
    }

    #[test]
    fn test_workshop_basic_example() {
        let report =
            segment_workshop_report("## Workshop 1: good\n## Comparison: similar\n## Suggested Workshop: pick 1");
        assert_eq!(report.workshops, vec![ReportSection::new("Workshop 1", "good")]);
        assert_eq!(report.comparison.as_deref(), Some("similar"));
        assert_eq!(report.suggestion.as_deref(), Some("pick 1"));
    }

    #[test]
    fn test_workshop_backend_layout() {
        let text = "---\n## Workshop 1 Analysis:\nAED 4,200, 5 days\n\n## Workshop 2 Analysis:\nAED 3,900\n## Workshop 3 Analysis:\nAED 5,100\n## Comparison:\nWorkshop 2 is cheapest.\n## Suggested Workshop:\nWorkshop 2\n## Notes:\nignored";
        let report = segment_workshop_report(text);
        let titles: Vec<_> = report.workshops.iter().map(|w| w.heading.as_str()).collect();
        assert_eq!(titles, ["Workshop 1 Analysis", "Workshop 2 Analysis", "Workshop 3 Analysis"]);
        assert_eq!(report.workshops[0].body, "AED 4,200, 5 days");
        assert_eq!(report.comparison.as_deref(), Some("Workshop 2 is cheapest."));
        assert_eq!(report.suggestion.as_deref(), Some("Workshop 2"));
    }

    #[test]
    fn test_workshop_first_comparison_wins() {
        let report = segment_workshop_report("## Comparison: first\n## Price comparison: second");
        assert_eq!(report.comparison.as_deref(), Some("first"));
        assert!(report.workshops.is_empty());
    }

    #[test]
    fn test_workshop_title_without_colon_uses_first_line() {
        let report = segment_workshop_report("## Workshop 3\nNo estimate provided");
        assert_eq!(report.workshops, vec![ReportSection::new("Workshop 3", "No estimate provided")]);
    }

    #[test]
    fn test_workshop_unclassified_only() {
        let report = segment_workshop_report("## Summary: nothing useful\n\n## ");
        assert!(report.is_empty());
    }

    #[test]
    fn test_incomplete_markers() {
        assert!(report_is_incomplete("Policy Details: Unknown"));
        assert!(report_is_incomplete("Comparison: Insufficient data"));
        assert!(!report_is_incomplete("All fields present"));
    }
}
