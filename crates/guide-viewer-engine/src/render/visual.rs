use std::fmt::Write as _;

use crate::highlight::HighlightedCode;
use crate::view_mode::{BlockId, ViewMode, ViewModes};

use super::{RenderContext, Renderer};

/// HTML element kinds the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Ul,
    Ol,
    Li,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
    Hr,
    Br,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    Em,
    Strong,
    Del,
    A,
    Img,
    Code,
    Sup,
    Input,
}

impl Tag {
    pub fn heading(level: u8) -> Tag {
        match level {
            1 => Tag::H1,
            2 => Tag::H2,
            3 => Tag::H3,
            4 => Tag::H4,
            5 => Tag::H5,
            _ => Tag::H6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Blockquote => "blockquote",
            Tag::Hr => "hr",
            Tag::Br => "br",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Em => "em",
            Tag::Strong => "strong",
            Tag::Del => "del",
            Tag::A => "a",
            Tag::Img => "img",
            Tag::Code => "code",
            Tag::Sup => "sup",
            Tag::Input => "input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<String>,
    /// Attributes in insertion order.
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<VisualNode>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            class: None,
            attrs: vec![],
            children: vec![],
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn children(mut self, children: Vec<VisualNode>) -> Self {
        self.children = children;
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }
}

/// One node of the rendered output.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualNode {
    Element(Element),
    Text(String),
    /// Raw HTML from the source, inserted unescaped.
    RawHtml { html: String, inline: bool },
    /// A highlighted code block with no toggle.
    Code(HighlightedCode),
    /// A markdown code block shown as preview or source.
    DualView(DualView),
}

impl From<Element> for VisualNode {
    fn from(element: Element) -> Self {
        VisualNode::Element(element)
    }
}

impl VisualNode {
    fn push_text(&self, out: &mut String) {
        match self {
            VisualNode::Element(element) => {
                for child in &element.children {
                    child.push_text(out);
                }
            }
            VisualNode::Text(text) => out.push_str(text),
            VisualNode::RawHtml { .. } | VisualNode::Code(_) | VisualNode::DualView(_) => {}
        }
    }
}

/// A markdown-tagged code block that can show either its rendered preview or its source.
#[derive(Debug, Clone, PartialEq)]
pub struct DualView {
    pub id: BlockId,
    /// Mode selected for this block at render time.
    pub mode: ViewMode,
    pub raw_text: String,
    /// Nesting level of the document containing this block.
    pub nesting_level: u32,
    /// `raw_text` highlighted as markdown.
    pub source: HighlightedCode,
}

impl DualView {
    pub fn container_class(&self) -> String {
        format!("nested-markdown level-{}", self.nesting_level)
    }

    /// Render the block's text one level deeper.
    ///
    /// Block ids are only unique within one document, so every preview takes its own
    /// map of view modes.
    pub fn preview(&self, renderer: &Renderer, view_modes: ViewModes) -> VisualTree {
        renderer.render_with(
            &self.raw_text,
            true,
            &RenderContext {
                nesting_level: self.nesting_level + 1,
                view_modes: &view_modes,
            },
        )
    }
}

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub root: Element,
    pub nesting_level: u32,
}

impl VisualTree {
    /// Elements in depth-first order, not descending into dual-view previews.
    pub fn elements(&self) -> Vec<&Element> {
        fn walk<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
            out.push(element);
            for child in &element.children {
                if let VisualNode::Element(inner) = child {
                    walk(inner, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    pub fn elements_with_tag(&self, tag: Tag) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|element| element.tag == tag)
            .collect()
    }

    fn leaf_nodes(&self) -> Vec<&VisualNode> {
        self.elements()
            .into_iter()
            .flat_map(|element| element.children.iter())
            .filter(|node| !matches!(node, VisualNode::Element(_)))
            .collect()
    }

    pub fn dual_views(&self) -> Vec<&DualView> {
        self.leaf_nodes()
            .into_iter()
            .filter_map(|node| match node {
                VisualNode::DualView(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn code_blocks(&self) -> Vec<&HighlightedCode> {
        self.leaf_nodes()
            .into_iter()
            .filter_map(|node| match node {
                VisualNode::Code(code) => Some(code),
                _ => None,
            })
            .collect()
    }

    /// Indented one-line-per-node description of the tree, for tests and debug logging.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        outline_element(&self.root, 0, &mut out);
        out
    }
}

fn outline_element(element: &Element, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", element.tag.name());
    if let Some(class) = &element.class {
        for part in class.split_whitespace() {
            let _ = write!(out, ".{part}");
        }
    }
    for (name, value) in &element.attrs {
        let _ = write!(out, "[{name}={value}]");
    }
    out.push('\n');
    for child in &element.children {
        outline_node(child, depth + 1, out);
    }
}

fn outline_node(node: &VisualNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        VisualNode::Element(element) => outline_element(element, depth, out),
        VisualNode::Text(text) => {
            let _ = writeln!(out, "{indent}{text:?}");
        }
        VisualNode::RawHtml { html, inline } => {
            let kind = if *inline { "inline-html" } else { "html" };
            let _ = writeln!(out, "{indent}{kind} {html:?}");
        }
        VisualNode::Code(code) => {
            let _ = writeln!(
                out,
                "{indent}code-block[{}] lines={}",
                code.language,
                code.lines.len()
            );
        }
        VisualNode::DualView(view) => {
            let _ = writeln!(
                out,
                "{indent}dual-view #{} level={} mode={}",
                view.id.ordinal,
                view.nesting_level,
                view.mode.label()
            );
        }
    }
}
