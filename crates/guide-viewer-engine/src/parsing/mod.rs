pub mod builder;
pub mod document;

use std::sync::OnceLock;

use pulldown_cmark::{Options, Parser};
use regex::Regex;

use builder::TreeBuilder;
pub use document::{Alignment, CodeBlock, Document, Node, NodeKind};

/// Language used for code blocks without a usable fence annotation.
pub const DEFAULT_LANGUAGE: &str = "text";

/// HTML elements that never take a closing tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parser options: GFM tables, strikethrough, task lists, footnotes and GFM blockquote tags.
///
/// Raw HTML is always emitted by pulldown-cmark and is kept as `Html` nodes.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_GFM);
    options
}

/// Parse markdown into a [`Document`]. Total over all input strings.
pub fn parse_document(content: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(content, parser_options()) {
        builder.push(event);
    }
    builder.finish()
}

/// Extract the language tag from a fence info string.
///
/// Takes the first word of the info string and keeps its leading word characters,
/// so `rust,ignore` gives `rust` and `{python}` falls back to `text`.
pub fn fence_language(info: &str) -> String {
    static LANGUAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    let language_regex =
        LANGUAGE_REGEX.get_or_init(|| Regex::new(r"^\w+").expect("Invalid language regex"));

    info.split_whitespace()
        .next()
        .and_then(|word| language_regex.find(word))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}
