use leptos::prelude::*;

use hub_api_types::DesignIssue;

use crate::components::spinner::Spinner;
use crate::generation::{AnalysisView, LoadingStage};
use crate::stages::{self, Feature};

/// CSS class for an issue's severity band (1 = critical, 2 = moderate,
/// anything else = minor).
pub fn severity_class(severity: u8) -> &'static str {
    match severity {
        1 => "issue-critical",
        2 => "issue-moderate",
        _ => "issue-minor",
    }
}

#[cfg(feature = "markdown")]
fn render_raw_text(text: &str) -> String {
    let mut out = String::new();
    pulldown_cmark::html::push_html(&mut out, pulldown_cmark::Parser::new(text));
    out
}

#[cfg(not(feature = "markdown"))]
fn render_raw_text(text: &str) -> String {
    format!("<pre>{}</pre>", text.replace('<', "&lt;").replace('>', "&gt;"))
}

fn issue_section(title: &'static str, issues: &[DesignIssue]) -> impl IntoView {
    let cards = issues
        .iter()
        .map(|issue| {
            view! {
                <div class=format!("issue-card {}", severity_class(issue.severity))>
                    <div class="issue-head">
                        <span class="issue-title">{issue.title.clone()}</span>
                        <span
                            class="issue-category"
                            style=format!("color: {}", issue.color_code)
                        >
                            {issue.category.clone()}
                        </span>
                    </div>
                    <p class="issue-description">{issue.description.clone()}</p>
                </div>
            }
        })
        .collect_view();
    view! {
        <section class="issue-section">
            <h3>{title}</h3>
            {cards}
        </section>
    }
}

/// Structured critique display for the suggestions tab, with a markdown
/// fallback when the backend could only produce raw text.
#[component]
pub fn AnalysisDisplay(
    analysis: RwSignal<AnalysisView>,
    stage: RwSignal<LoadingStage>,
) -> impl IntoView {
    view! {
        <div class="analysis-display">
            {move || {
                let view = analysis.get();
                if view.loading {
                    let stage_str = stage.get().as_str();
                    return view! {
                        <div class="progress-panel">
                            <Spinner size="lg"/>
                            <p class="progress-message">
                                {stages::stage_message(Feature::Analysis, stage_str)}
                            </p>
                            <p class="progress-hint">"This may take a few moments..."</p>
                        </div>
                    }.into_any();
                }
                if let Some(error) = view.error {
                    return view! { <div class="analysis-error">{error}</div> }.into_any();
                }
                let Some(result) = view.result else {
                    return view! {
                        <p class="analysis-empty">
                            "Upload a design to get improvement suggestions."
                        </p>
                    }.into_any();
                };
                if result.analysis.is_structured() {
                    let critical = result.analysis.critical.unwrap_or_default();
                    let moderate = result.analysis.moderate.unwrap_or_default();
                    let suggestions = result.analysis.suggestions.unwrap_or_default();
                    view! {
                        <div class="analysis-sections">
                            {(!critical.is_empty()).then(|| issue_section("Critical Issues", &critical))}
                            {(!moderate.is_empty()).then(|| issue_section("Moderate Issues", &moderate))}
                            {(!suggestions.is_empty()).then(|| issue_section("Suggestions", &suggestions))}
                        </div>
                    }.into_any()
                } else {
                    let raw = result.analysis.raw_text.unwrap_or_default();
                    view! {
                        <div class="analysis-raw" inner_html=render_raw_text(&raw)></div>
                    }.into_any()
                }
            }}
        </div>
    }
}
