use crate::ui::app::Page;
use dioxus::prelude::*;

const ENTRIES: [(&str, Page); 3] = [
    ("Research Summarizer", Page::Summarizer),
    ("Guides", Page::GuideList),
    ("Create Guide", Page::CreateGuide),
];

#[component]
pub fn Sidebar(current: Page, on_navigate: EventHandler<Page>) -> Element {
    let section = current.nav_section();
    let entries = ENTRIES.map(|(label, page)| {
        let class = if page == section {
            "sidebar-item active"
        } else {
            "sidebar-item"
        };
        (label, page, class)
    });

    rsx! {
        nav {
            class: "sidebar",
            h2 { "Guide Viewer" }
            ul {
                class: "sidebar-list",
                for (label, page, class) in entries {
                    li {
                        key: "{label}",
                        class: "{class}",
                        onclick: move |_| on_navigate.call(page.clone()),
                        "{label}"
                    }
                }
            }
        }
    }
}
