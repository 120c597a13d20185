use dioxus::prelude::*;
use guide_viewer_client::{GuideClient, ResearchReport};

use super::MarkdownRenderer;

#[component]
pub fn ResearchSummarizer() -> Element {
    let client = use_context::<GuideClient>();
    let mut topic = use_signal(String::new);
    let mut report = use_signal(|| None::<ResearchReport>);
    let mut loading = use_signal(|| false);

    let on_summarize = move |_| {
        let requested = topic.read().trim().to_string();
        if requested.is_empty() {
            return;
        }
        loading.set(true);
        let client = client.clone();
        spawn(async move {
            log::info!("Requesting research summary for {requested:?}");
            report.set(client.run_research(&requested).await);
            loading.set(false);
        });
    };

    let button_label = if loading() { "Summarizing..." } else { "Summarize" };

    rsx! {
        div {
            class: "page research-summarizer",
            h1 { "Research Summarizer" }
            div {
                class: "form-row",
                input {
                    class: "text-input",
                    placeholder: "Enter a topic",
                    value: "{topic}",
                    oninput: move |event| topic.set(event.value()),
                }
                button {
                    class: "primary-button",
                    disabled: loading(),
                    onclick: on_summarize,
                    "{button_label}"
                }
            }
            if let Some(current) = report() {
                ReportView { report: current }
            }
        }
    }
}

/// The summary of a finished research run.
#[component]
pub fn ReportView(report: ResearchReport) -> Element {
    let tokens = report.summary.token_usage.total_tokens;

    rsx! {
        div {
            class: "report",
            h2 { "Summary:" }
            p { class: "report-meta", "{report.topic} ({tokens} tokens)" }
            MarkdownRenderer { content: report.summary.raw.clone() }
        }
    }
}
