//! Raw HTML from the source, re-serialized so embedded links and images follow the
//! same rules as markdown ones.

use std::fmt::Write as _;

use scraper::{ElementRef, Html, Node};

use crate::parsing::VOID_ELEMENTS;

/// Elements whose text content is written as-is.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse an HTML fragment and write it back out with `a` and `img` attributes enforced.
///
/// Every `a` gets `target="_blank"` and `rel="noopener noreferrer"`, replacing whatever
/// the source said. Every `img` gets `loading="lazy"` and an `alt`, empty when missing.
/// Attributes are written in name order. Unbalanced tags come back balanced, as the
/// HTML parser repairs them.
pub fn rewrite_raw_html(source: &str) -> String {
    let fragment = Html::parse_fragment(source);
    let mut out = String::new();
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(parent: ElementRef<'_>, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&html_escape::encode_text(&*text.text)),
            Node::Comment(comment) => {
                let _ = write!(out, "<!--{}-->", &*comment.comment);
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_element(element, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    let mut attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    match name {
        "a" => {
            set_attr(&mut attrs, "target", "_blank");
            set_attr(&mut attrs, "rel", "noopener noreferrer");
        }
        "img" => {
            if !attrs.iter().any(|(key, _)| *key == "alt") {
                attrs.push(("alt", ""));
            }
            set_attr(&mut attrs, "loading", "lazy");
        }
        _ => {}
    }
    attrs.sort_by_key(|(key, _)| *key);

    let _ = write!(out, "<{name}");
    for (key, value) in &attrs {
        let _ = write!(
            out,
            " {key}=\"{}\"",
            html_escape::encode_double_quoted_attribute(value)
        );
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    if RAW_TEXT_ELEMENTS.contains(&name) {
        for child in element.children() {
            if let Node::Text(text) = child.value() {
                out.push_str(&text.text);
            }
        }
    } else {
        write_children(element, out);
    }
    let _ = write!(out, "</{name}>");
}

fn set_attr<'a>(attrs: &mut Vec<(&'a str, &'a str)>, name: &'a str, value: &'a str) {
    attrs.retain(|(key, _)| *key != name);
    attrs.push((name, value));
}
