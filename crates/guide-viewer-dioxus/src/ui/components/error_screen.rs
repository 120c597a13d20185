use dioxus::prelude::*;

/// Full-window error shown instead of the app when startup fails.
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            class: "error-screen",
            h1 { class: "error-title", "{title}" }
            p { "{message}" }
            if let Some(ref detail_text) = details {
                pre { class: "error-details", "{detail_text}" }
            }
            p {
                class: "error-hint",
                "Fix the file or start with --config pointing at another one."
            }
        }
    }
}
