use dioxus::prelude::*;
use guide_viewer_engine::HighlightedCode;

/// Syntax highlighted code with optional line numbers.
#[component]
pub fn CodeView(code: HighlightedCode) -> Element {
    let code_class = format!("language-{}", code.language);
    let pre_class = if code.wrap_long_lines {
        "code-view wrap"
    } else {
        "code-view"
    };
    let background = code
        .background
        .map(|color| format!("background-color: {};", color.hex()))
        .unwrap_or_default();

    rsx! {
        div {
            class: "code-block",
            pre {
                class: "{pre_class}",
                style: "{background}",
                code {
                    class: "{code_class}",
                    for line in code.lines.iter() {
                        div {
                            key: "{line.number}",
                            class: "code-line",
                            if code.show_line_numbers {
                                span { class: "line-number", "{line.number}" }
                            }
                            span {
                                class: "line-content",
                                for styled in line.spans.iter() {
                                    span { style: "{styled.css()}", "{styled.text}" }
                                }
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
    use guide_viewer_engine::{HighlightOptions, Highlighter};

    fn render_code(code: HighlightedCode) -> String {
        let mut dom = VirtualDom::new_with_props(CodeView, CodeViewProps { code });
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_code_view_numbers_lines() {
        let code = Highlighter::default().highlight("let a = 1;\nlet b = 2;", "rust");
        let html = render_code(code);

        assert!(html.contains("language-rust"));
        assert_eq!(html.matches("class=\"line-number\"").count(), 2);
        assert!(html.contains("color: #"));
    }

    #[test]
    fn test_code_view_without_line_numbers_and_wrapping() {
        let highlighter = Highlighter::new(HighlightOptions {
            show_line_numbers: false,
            wrap_long_lines: true,
            ..HighlightOptions::default()
        });
        let html = render_code(highlighter.highlight("plain words", "text"));

        assert!(!html.contains("line-number"));
        assert!(html.contains("code-view wrap"));
        assert!(html.contains("plain words"));
    }
}
