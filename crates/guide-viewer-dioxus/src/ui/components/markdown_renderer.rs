use dioxus::prelude::*;
use guide_viewer_engine::render::{Element as VisualElement, Tag, VisualNode};
use guide_viewer_engine::{BlockId, RenderContext, Renderer, ViewModes};

use super::{CodeView, DualViewBlock};

/// Renders markdown through the engine and displays the resulting tree.
///
/// Each instance owns the view modes of the dual-view blocks it shows. Previews
/// nest another `MarkdownRenderer` one level deeper, so toggles in a nested
/// document never touch its parent's state.
#[component]
pub fn MarkdownRenderer(
    content: String,
    #[props(default)] is_nested: bool,
    #[props(default)] nesting_level: u32,
) -> Element {
    let renderer = try_use_context::<Renderer>().unwrap_or_default();
    let mut view_modes = use_signal(ViewModes::default);
    let on_toggle = use_callback(move |id: BlockId| {
        let mode = view_modes.write().toggle(id);
        log::debug!("Block {id} now shows {}", mode.label());
    });

    let modes = view_modes.read().clone();
    let tree = renderer.render_with(
        &content,
        is_nested,
        &RenderContext {
            nesting_level,
            view_modes: &modes,
        },
    );

    render_element(&tree.root, on_toggle)
}

fn render_node(node: &VisualNode, on_toggle: Callback<BlockId>) -> Element {
    match node {
        VisualNode::Element(element) => render_element(element, on_toggle),
        VisualNode::Text(text) => rsx! { "{text}" },
        VisualNode::RawHtml { html, inline: true } => rsx! {
            span { class: "markdown-html", dangerous_inner_html: "{html}" }
        },
        VisualNode::RawHtml { html, inline: false } => rsx! {
            div { class: "markdown-html", dangerous_inner_html: "{html}" }
        },
        VisualNode::Code(code) => rsx! {
            CodeView { code: code.clone() }
        },
        VisualNode::DualView(view) => {
            let key = view.id.to_string();
            rsx! {
                DualViewBlock { key: "{key}", view: view.clone(), on_toggle }
            }
        }
    }
}

fn render_element(element: &VisualElement, on_toggle: Callback<BlockId>) -> Element {
    let class = element.class.clone();
    let attr = |name: &str| element.get_attr(name).map(str::to_string);
    let children = element
        .children
        .iter()
        .map(|child| render_node(child, on_toggle));

    match element.tag {
        Tag::Div => rsx! {
            div { class, id: attr("id"), {children} }
        },
        Tag::Ul => rsx! {
            ul { class, {children} }
        },
        Tag::Ol => rsx! {
            ol { class, start: attr("start"), {children} }
        },
        Tag::Li => rsx! {
            li { class, {children} }
        },
        Tag::H1 => rsx! {
            h1 { class, {children} }
        },
        Tag::H2 => rsx! {
            h2 { class, {children} }
        },
        Tag::H3 => rsx! {
            h3 { class, {children} }
        },
        Tag::H4 => rsx! {
            h4 { class, {children} }
        },
        Tag::H5 => rsx! {
            h5 { class, {children} }
        },
        Tag::H6 => rsx! {
            h6 { class, {children} }
        },
        Tag::Blockquote => rsx! {
            blockquote { class, {children} }
        },
        Tag::Hr => rsx! {
            hr { class }
        },
        Tag::Br => rsx! {
            br {}
        },
        Tag::Table => rsx! {
            table { class, {children} }
        },
        Tag::Thead => rsx! {
            thead { {children} }
        },
        Tag::Tbody => rsx! {
            tbody { {children} }
        },
        Tag::Tr => rsx! {
            tr { {children} }
        },
        Tag::Th => rsx! {
            th { style: attr("style"), {children} }
        },
        Tag::Td => rsx! {
            td { style: attr("style"), {children} }
        },
        Tag::Em => rsx! {
            em { {children} }
        },
        Tag::Strong => rsx! {
            strong { {children} }
        },
        Tag::Del => rsx! {
            del { {children} }
        },
        Tag::A => rsx! {
            a {
                class,
                href: attr("href"),
                title: attr("title"),
                target: attr("target"),
                rel: attr("rel"),
                {children}
            }
        },
        Tag::Img => rsx! {
            img {
                class,
                src: attr("src"),
                alt: attr("alt"),
                title: attr("title"),
                "loading": attr("loading"),
            }
        },
        Tag::Code => rsx! {
            code { class, {children} }
        },
        Tag::Sup => rsx! {
            sup { class, {children} }
        },
        Tag::Input => rsx! {
            input {
                class,
                r#type: attr("type"),
                disabled: element.get_attr("disabled").is_some(),
                checked: element.get_attr("checked").is_some(),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;

    fn render_markdown(content: &str) -> String {
        let mut dom = VirtualDom::new_with_props(
            MarkdownRenderer,
            MarkdownRendererProps {
                content: content.to_string(),
                is_nested: false,
                nesting_level: 0,
            },
        );
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    /// Wrap `inner` in `depth` markdown fences, each one backtick longer than the one inside.
    fn nested_markdown(depth: usize, inner: &str) -> String {
        let mut content = inner.to_string();
        for level in 0..depth {
            let fence = "`".repeat(3 + level);
            content = format!("{fence}markdown\n{content}\n{fence}");
        }
        content
    }

    #[test]
    fn test_title_and_markdown_block() {
        let html = render_markdown("# Title\n\n```markdown\n**bold**\n```");

        assert!(html.contains("markdown-renderer root"));
        assert!(html.contains("Title"));
        assert!(html.contains("nested-markdown level-0"));
        assert!(html.contains(">Preview<"));
        assert!(html.contains(">Source<"));
        assert!(html.contains("markdown-preview"));
        assert!(html.contains("markdown-renderer nested"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_links_open_in_new_context() {
        let html = render_markdown("[docs](https://example.com)");

        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_image_gets_empty_alt_and_lazy_loading() {
        let html = render_markdown("![](diagram.png)");

        assert!(html.contains("src=\"diagram.png\""));
        assert!(html.contains("alt=\"\""));
        assert!(html.contains("loading=\"lazy\""));
    }

    #[test]
    fn test_other_languages_have_no_toggle() {
        let html = render_markdown("```rust\nfn main() {}\n```");

        assert!(html.contains("language-rust"));
        assert!(html.contains("line-number"));
        assert!(!html.contains(">Preview<"));
        assert!(!html.contains("nested-markdown"));
    }

    #[test]
    fn test_inline_html_wraps_its_text() {
        let html = render_markdown("press <kbd>Ctrl</kbd> to copy");

        assert!(html.contains("<span class=\"markdown-html\"><kbd>Ctrl</kbd></span>"));
        assert!(html.contains(" to copy"));
    }

    #[test]
    fn test_raw_html_links_and_images_follow_markdown_rules() {
        let html = render_markdown(
            "<a href=\"https://evil.example\" target=\"_self\">here</a> <img src=\"a.png\">",
        );

        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(!html.contains("_self"));
        assert!(html.contains("alt=\"\""));
        assert!(html.contains("loading=\"lazy\""));
    }

    #[test]
    fn test_nested_previews_stop_at_ceiling() {
        let html = render_markdown(&nested_markdown(12, "deepest"));

        for level in 0..9 {
            assert!(html.contains(&format!("nested-markdown level-{level}\"")));
        }
        assert!(!html.contains("nested-markdown level-9"));
        assert_eq!(html.matches(">Preview<").count(), 9);
        assert!(html.contains("language-markdown"));
    }
}
