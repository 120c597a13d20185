use dioxus::prelude::*;
use guide_viewer_client::{GuideClient, GuideContent};

use super::MarkdownRenderer;

/// Loads one guide. Mounted with `key` set to the task id, so a new id gets a fresh load.
#[component]
pub fn GuideDetails(task_id: String) -> Element {
    let client = use_context::<GuideClient>();
    let guide = use_resource({
        let task_id = task_id.clone();
        move || {
            let client = client.clone();
            let task_id = task_id.clone();
            async move { client.fetch_guide_content(&task_id).await }
        }
    });

    let loaded = guide.cloned();
    rsx! {
        GuideDetailsView {
            loading: loaded.is_none(),
            guide: loaded.flatten(),
        }
    }
}

#[component]
pub fn GuideDetailsView(loading: bool, guide: Option<GuideContent>) -> Element {
    if loading {
        return rsx! {
            div { class: "loading", "Loading guide..." }
        };
    }
    let Some(guide) = guide else {
        return rsx! {
            h2 { class: "not-found", "Guide not found" }
        };
    };

    rsx! {
        div {
            class: "page guide-details",
            h1 { "{guide.task_id}" }
            div {
                class: "guide-body",
                MarkdownRenderer { content: guide.content.clone() }
            }
        }
    }
}
