use dioxus::prelude::*;
use guide_viewer_client::{Guide, GuideClient};

/// Loads the guide list from the backend.
#[component]
pub fn GuideList(on_select: EventHandler<String>, on_create: EventHandler<()>) -> Element {
    let client = use_context::<GuideClient>();
    let guides = use_resource(move || {
        let client = client.clone();
        async move { client.list_guides().await }
    });

    let loaded = guides.cloned();
    rsx! {
        GuideListView {
            loading: loaded.is_none(),
            guides: loaded.unwrap_or_default(),
            on_select,
            on_create,
        }
    }
}

#[component]
pub fn GuideListView(
    loading: bool,
    guides: Vec<Guide>,
    on_select: EventHandler<String>,
    on_create: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "page guide-list",
            div {
                class: "page-header",
                h1 { "Guide List" }
                button {
                    class: "primary-button",
                    title: "Create New Guide",
                    onclick: move |_| on_create.call(()),
                    "Create New Guide"
                }
            }
            if loading {
                div { class: "loading", "Loading guides..." }
            } else if guides.is_empty() {
                p { class: "empty", "No guides yet." }
            } else {
                ul {
                    class: "guide-items",
                    for guide in guides.iter() {
                        li {
                            key: "{guide.task_id}",
                            button {
                                class: "guide-item",
                                onclick: {
                                    let task_id = guide.task_id.clone();
                                    move |_| on_select.call(task_id.clone())
                                },
                                "{guide.display_title()}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;

    fn guide(task_id: &str, title: Option<&str>) -> Guide {
        Guide {
            task_id: task_id.to_string(),
            title: title.map(str::to_string),
            file: format!("output/{task_id}.md"),
        }
    }

    fn loading_list() -> Element {
        rsx! {
            GuideListView {
                loading: true,
                guides: Vec::new(),
                on_select: move |_| {},
                on_create: move |_| {},
            }
        }
    }

    fn loaded_list() -> Element {
        rsx! {
            GuideListView {
                loading: false,
                guides: vec![guide("t1", Some("Ownership in Rust")), guide("t2", None)],
                on_select: move |_| {},
                on_create: move |_| {},
            }
        }
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_loading_indicator() {
        let html = render(loading_list);

        assert!(html.contains("Loading guides..."));
        assert!(html.contains("Create New Guide"));
        assert!(!html.contains("guide-item"));
    }

    #[test]
    fn test_untitled_guides_get_placeholder_title() {
        let html = render(loaded_list);

        assert_eq!(html.matches("class=\"guide-item\"").count(), 2);
        assert!(html.contains("Ownership in Rust"));
        assert!(html.contains("Untitled Guide"));
        assert!(!html.contains("Loading guides..."));
    }
}
