//! Read-only views of backend results.

use claimdesk::{report_is_incomplete, segment_claims_report, ClaimResult, ReportSection, WorkshopReport};
use leptos::*;

/// Full claim result: analysis cards, details, table, report sections and
/// next steps.
#[component]
pub fn ClaimReport(result: ClaimResult) -> impl IntoView {
    let analysis = result.analysis();
    let (status_class, status_text) = if result.is_success() {
        ("status-banner success", "✅ Claim analysed".to_string())
    } else {
        ("status-banner error", format!("❌ Claim {}", result.status))
    };

    let table = result.table();
    let report = result.report().map(str::to_string);
    let incomplete = report.as_deref().map(report_is_incomplete).unwrap_or(false);
    let sections = report.as_deref().map(segment_claims_report).unwrap_or_default();
    let raw = serde_json::to_string_pretty(&result).unwrap_or_default();

    view! {
        <div class="result">
            <div class=status_class>{status_text}</div>

            <div class="card">
                <h3>"Executive Summary"</h3>
                <p>{analysis.executive_summary()}</p>
            </div>

            <div class="metric-row">
                <div class="metric">
                    <span class="metric-label">"Estimated claim"</span>
                    <span class="metric-value">{analysis.estimated_claim()}</span>
                </div>
                <div class="metric">
                    <span class="metric-label">"Policy suggestion"</span>
                    <span class="metric-value">{analysis.policy_suggestion()}</span>
                </div>
            </div>

            <DetailList title="Policy Details" pairs=analysis.policy_details()/>
            <DetailList title="Claim Details" pairs=analysis.claim_details()/>

            {table.map(|table| view! {
                <div class="card">
                    <h3>"Details"</h3>
                    <table class="result-table">
                        <thead>
                            <tr>{table.columns.into_iter().map(|c| view! { <th>{c}</th> }).collect_view()}</tr>
                        </thead>
                        <tbody>
                            {table.rows.into_iter().map(|row| view! {
                                <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            })}

            {incomplete.then(|| view! {
                <div class="warning-message">
                    "⚠️ Some values could not be read from your documents. Check them before relying on this report."
                </div>
            })}

            <SectionList sections=sections/>

            {(!result.next_steps.is_empty()).then(|| view! {
                <div class="card">
                    <h3>"Next Steps"</h3>
                    <ol>
                        {result.next_steps.iter().map(|step| view! { <li>{step.clone()}</li> }).collect_view()}
                    </ol>
                </div>
            })}

            <details class="raw-response">
                <summary>"Raw response"</summary>
                <pre>{raw}</pre>
            </details>
        </div>
    }
}

#[component]
fn DetailList(title: &'static str, pairs: Vec<(String, String)>) -> impl IntoView {
    if pairs.is_empty() {
        return view! {}.into_view();
    }
    view! {
        <div class="card">
            <h3>{title}</h3>
            <dl class="detail-list">
                {pairs.into_iter().map(|(label, value)| view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                }).collect_view()}
            </dl>
        </div>
    }
    .into_view()
}

#[component]
fn SectionList(sections: Vec<ReportSection>) -> impl IntoView {
    sections
        .into_iter()
        .map(|section| {
            view! {
                <div class="card report-section">
                    <h4>{section.heading}</h4>
                    <p class="pre-line">{section.body}</p>
                </div>
            }
        })
        .collect_view()
}

/// Workshop cards side by side, then the comparison and the suggestion.
#[component]
pub fn WorkshopReportView(report: WorkshopReport, raw: String) -> impl IntoView {
    if report.is_empty() {
        return view! {
            <div class="card">
                <p class="pre-line">{raw}</p>
            </div>
        }
        .into_view();
    }

    view! {
        <div class="result">
            <div class="workshop-grid">
                {report.workshops.into_iter().map(|card| view! {
                    <div class="card workshop-card">
                        <h3>{card.heading}</h3>
                        <p class="pre-line">{card.body}</p>
                    </div>
                }).collect_view()}
            </div>

            {report.comparison.map(|text| view! {
                <div class="card">
                    <h3>"📊 Comparison"</h3>
                    <p class="pre-line">{text}</p>
                </div>
            })}

            {report.suggestion.map(|text| view! {
                <div class="card suggestion">
                    <h3>"🏆 Suggested Workshop"</h3>
                    <p class="pre-line">{text}</p>
                </div>
            })}
        </div>
    }
    .into_view()
}
