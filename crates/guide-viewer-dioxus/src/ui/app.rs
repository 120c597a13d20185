use dioxus::prelude::*;
use guide_viewer_client::GuideClient;
use guide_viewer_config::{Config, HighlightConfig};
use guide_viewer_engine::{HighlightOptions, Renderer};

use super::components::{CreateGuide, GuideDetails, GuideList, ResearchSummarizer, Sidebar};

const APP_CSS: &str = include_str!("../assets/guide-viewer.css");

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Summarizer,
    GuideList,
    GuideDetails {
        task_id: String,
    },
    CreateGuide,
}

impl Page {
    /// The sidebar entry highlighted while this page is shown.
    pub fn nav_section(&self) -> Page {
        match self {
            Page::GuideDetails { .. } => Page::GuideList,
            other => other.clone(),
        }
    }
}

pub fn highlight_options(config: &HighlightConfig) -> HighlightOptions {
    HighlightOptions {
        theme: config.theme.clone(),
        wrap_long_lines: config.wrap_long_lines,
        ..HighlightOptions::default()
    }
}

#[component]
pub fn App(config: Config) -> Element {
    use_context_provider(|| {
        GuideClient::new(config.api_base_url.clone(), config.summarizer_url.clone())
    });
    use_context_provider(|| Renderer::new(highlight_options(&config.highlight)));

    let mut page = use_signal(Page::default);
    let current = page();

    let content = match current.clone() {
        Page::Summarizer => rsx! {
            ResearchSummarizer {}
        },
        Page::GuideList => rsx! {
            GuideList {
                on_select: move |task_id: String| page.set(Page::GuideDetails { task_id }),
                on_create: move |_| page.set(Page::CreateGuide),
            }
        },
        Page::GuideDetails { task_id } => rsx! {
            GuideDetails { key: "{task_id}", task_id: task_id.clone() }
        },
        Page::CreateGuide => rsx! {
            CreateGuide {}
        },
    };

    rsx! {
        style { {APP_CSS} }
        div {
            class: "app-container",
            Sidebar {
                current,
                on_navigate: move |next: Page| page.set(next),
            }
            main {
                class: "main-content",
                {content}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_details_page_highlights_guides_entry() {
        let page = Page::GuideDetails {
            task_id: "t1".to_string(),
        };
        assert_eq!(page.nav_section(), Page::GuideList);
        assert_eq!(Page::CreateGuide.nav_section(), Page::CreateGuide);
    }

    #[test]
    fn test_highlight_options_follow_config() {
        let options = highlight_options(&HighlightConfig {
            theme: "InspiredGitHub".to_string(),
            wrap_long_lines: true,
        });

        assert_eq!(options.theme, "InspiredGitHub");
        assert!(options.wrap_long_lines);
        assert!(options.show_line_numbers);
    }

    #[test]
    fn test_button_styles_have_one_rule_each() {
        for selector in [".primary-button {", ".secondary-button {"] {
            assert_eq!(APP_CSS.matches(selector).count(), 1, "{selector}");
        }
        assert!(!APP_CSS.contains(".primary-button,"));
    }

    #[test]
    fn test_app_starts_on_summarizer() {
        let mut dom = VirtualDom::new_with_props(
            App,
            AppProps {
                config: Config::default(),
            },
        );
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("app-container"));
        assert!(html.contains("Research Summarizer"));
        assert!(html.contains("Guides"));
        assert!(html.contains("Summarize"));
    }
}
