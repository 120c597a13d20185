use dioxus::prelude::*;
use guide_viewer_engine::{BlockId, DualView, ViewMode};

use super::{CodeView, MarkdownRenderer};

/// A markdown code block with Preview and Source tabs.
///
/// Both buttons report the block id; the owning renderer flips the stored mode.
#[component]
pub fn DualViewBlock(view: DualView, on_toggle: Callback<BlockId>) -> Element {
    let id = view.id;
    let container_class = view.container_class();
    let (preview_class, source_class) = match view.mode {
        ViewMode::Preview => ("toggle-button active", "toggle-button"),
        ViewMode::Source => ("toggle-button", "toggle-button active"),
    };

    let body = match view.mode {
        ViewMode::Preview => rsx! {
            div {
                class: "markdown-preview",
                MarkdownRenderer {
                    content: view.raw_text.clone(),
                    is_nested: true,
                    nesting_level: view.nesting_level + 1,
                }
            }
        },
        ViewMode::Source => rsx! {
            CodeView { code: view.source.clone() }
        },
    };

    rsx! {
        div {
            class: "{container_class}",
            id: "{id}",
            div {
                class: "view-toggle",
                button {
                    class: "{preview_class}",
                    onclick: move |_| on_toggle.call(id),
                    "Preview"
                }
                button {
                    class: "{source_class}",
                    onclick: move |_| on_toggle.call(id),
                    "Source"
                }
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use guide_viewer_engine::render;

    fn first_view(content: &str) -> DualView {
        render(content, false, 0).dual_views()[0].clone()
    }

    fn source_view() -> Element {
        let mut view = first_view("```markdown\n**bold**\n```");
        view.mode = ViewMode::Source;
        rsx! {
            DualViewBlock { view, on_toggle: move |_| {} }
        }
    }

    fn preview_view() -> Element {
        let view = first_view("```markdown\n**bold**\n```");
        rsx! {
            DualViewBlock { view, on_toggle: move |_| {} }
        }
    }

    #[test]
    fn test_preview_renders_nested_document() {
        let mut dom = VirtualDom::new(preview_view);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("toggle-button active\">Preview"));
        assert!(html.contains("markdown-renderer nested"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("line-number"));
    }

    #[test]
    fn test_source_shows_highlighted_markdown() {
        let mut dom = VirtualDom::new(source_view);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("toggle-button active\">Source"));
        assert!(html.contains("language-markdown"));
        assert!(html.contains("**"));
        assert!(!html.contains("<strong>"));
    }
}
