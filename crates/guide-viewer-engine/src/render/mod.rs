//! Recursive markdown renderer.
//!
//! A render pass parses the source text, then walks the [`Document`] producing one
//! [`VisualNode`] per document node. Code blocks tagged `markdown` become
//! [`DualView`] nodes whose preview is another render pass one nesting level deeper.
//! At [`MAX_NESTING_LEVEL`] markdown blocks are shown as plain highlighted source,
//! which bounds the recursion whatever the input.

mod raw_html;
pub mod visual;

use crate::highlight::{HighlightOptions, Highlighter};
use crate::parsing::{Alignment, CodeBlock, Node, NodeKind, parse_document};
use crate::view_mode::{BlockId, ViewModes};
use raw_html::rewrite_raw_html;

pub use visual::{DualView, Element, Tag, VisualNode, VisualTree};

/// Deepest nesting level at which a markdown block is still shown as a dual view.
pub const MAX_NESTING_LEVEL: u32 = 9;

/// Per-pass state: how deep this pass is and which views the user has selected.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub nesting_level: u32,
    pub view_modes: &'a ViewModes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renderer {
    highlighter: Highlighter,
}

impl Renderer {
    pub fn new(options: HighlightOptions) -> Self {
        Self {
            highlighter: Highlighter::new(options),
        }
    }

    /// Render with every dual-view block in its default view.
    pub fn render(&self, content: &str, is_nested: bool, nesting_level: u32) -> VisualTree {
        let view_modes = ViewModes::default();
        self.render_with(
            content,
            is_nested,
            &RenderContext {
                nesting_level,
                view_modes: &view_modes,
            },
        )
    }

    pub fn render_with(
        &self,
        content: &str,
        is_nested: bool,
        context: &RenderContext<'_>,
    ) -> VisualTree {
        let document = parse_document(content);
        let mut walker = Walker {
            highlighter: &self.highlighter,
            context,
            next_ordinal: 0,
        };
        let children = walker.nodes(&document.nodes);
        let class = if is_nested {
            "markdown-renderer nested"
        } else {
            "markdown-renderer root"
        };

        VisualTree {
            root: Element::new(Tag::Div).class(class).children(children),
            nesting_level: context.nesting_level,
        }
    }
}

/// Render with the default highlight options.
pub fn render(content: &str, is_nested: bool, nesting_level: u32) -> VisualTree {
    Renderer::default().render(content, is_nested, nesting_level)
}

struct Walker<'a> {
    highlighter: &'a Highlighter,
    context: &'a RenderContext<'a>,
    /// Ordinal handed to the next code block, for block ids.
    next_ordinal: usize,
}

impl Walker<'_> {
    fn nodes(&mut self, nodes: &[Node]) -> Vec<VisualNode> {
        nodes.iter().map(|node| self.node(node)).collect()
    }

    fn wrap(&mut self, tag: Tag, class: Option<&str>, node: &Node) -> VisualNode {
        let mut element = Element::new(tag).children(self.nodes(&node.children));
        element.class = class.map(str::to_string);
        element.into()
    }

    fn node(&mut self, node: &Node) -> VisualNode {
        match &node.kind {
            NodeKind::Paragraph => self.wrap(Tag::Div, Some("markdown-p"), node),
            NodeKind::Heading(level) => {
                let class = format!("markdown-h{level}");
                self.wrap(Tag::heading(*level), Some(class.as_str()), node)
            }
            NodeKind::BlockQuote => self.wrap(Tag::Blockquote, Some("markdown-blockquote"), node),
            NodeKind::List { start: None } => self.wrap(Tag::Ul, Some("markdown-ul"), node),
            NodeKind::List { start: Some(start) } => {
                let mut element = Element::new(Tag::Ol).class("markdown-ol");
                if *start != 1 {
                    element = element.attr("start", start.to_string());
                }
                element.children(self.nodes(&node.children)).into()
            }
            NodeKind::ListItem => self.wrap(Tag::Li, Some("markdown-li"), node),
            NodeKind::TaskMarker { checked } => {
                let mut element = Element::new(Tag::Input)
                    .class("markdown-task")
                    .attr("type", "checkbox")
                    .attr("disabled", "true");
                if *checked {
                    element = element.attr("checked", "true");
                }
                element.into()
            }
            NodeKind::Table { alignments } => self.table(node, alignments),
            NodeKind::TableHead => {
                let row = self.row(node, &[], Tag::Th);
                Element::new(Tag::Thead).children(vec![row]).into()
            }
            NodeKind::TableRow => self.row(node, &[], Tag::Td),
            NodeKind::TableCell => self.wrap(Tag::Td, None, node),
            NodeKind::Emphasis => self.wrap(Tag::Em, None, node),
            NodeKind::Strong => self.wrap(Tag::Strong, None, node),
            NodeKind::Strikethrough => self.wrap(Tag::Del, None, node),
            NodeKind::Link { href, title } => {
                let mut element = Element::new(Tag::A).class("markdown-a").attr("href", href);
                if !title.is_empty() {
                    element = element.attr("title", title);
                }
                element
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .children(self.nodes(&node.children))
                    .into()
            }
            NodeKind::Image { src, title } => {
                let mut element = Element::new(Tag::Img)
                    .class("markdown-img")
                    .attr("src", src)
                    .attr("alt", node.plain_text());
                if !title.is_empty() {
                    element = element.attr("title", title);
                }
                element.attr("loading", "lazy").into()
            }
            NodeKind::CodeSpan(code) => Element::new(Tag::Code)
                .class("markdown-code")
                .children(vec![VisualNode::Text(code.clone())])
                .into(),
            NodeKind::CodeBlock(block) => self.code_block(block),
            NodeKind::Html(html) => VisualNode::RawHtml {
                html: rewrite_raw_html(html),
                inline: false,
            },
            NodeKind::InlineHtml(html) => VisualNode::RawHtml {
                html: rewrite_raw_html(html),
                inline: true,
            },
            NodeKind::FootnoteReference(label) => {
                let link = Element::new(Tag::A)
                    .attr("href", format!("#fn-{label}"))
                    .children(vec![VisualNode::Text(label.clone())]);
                Element::new(Tag::Sup)
                    .class("markdown-footnote-ref")
                    .children(vec![link.into()])
                    .into()
            }
            NodeKind::FootnoteDefinition(label) => {
                let marker = Element::new(Tag::Sup)
                    .class("markdown-footnote-label")
                    .children(vec![VisualNode::Text(label.clone())]);
                let mut children: Vec<VisualNode> = vec![marker.into()];
                children.extend(self.nodes(&node.children));
                Element::new(Tag::Div)
                    .class("markdown-footnote")
                    .attr("id", format!("fn-{label}"))
                    .children(children)
                    .into()
            }
            NodeKind::Text(text) => VisualNode::Text(text.clone()),
            NodeKind::SoftBreak => VisualNode::Text("\n".to_string()),
            NodeKind::HardBreak => Element::new(Tag::Br).into(),
            NodeKind::Rule => Element::new(Tag::Hr).class("markdown-hr").into(),
            NodeKind::Group => self.wrap(Tag::Div, None, node),
        }
    }

    fn table(&mut self, node: &Node, alignments: &[Alignment]) -> VisualNode {
        let mut head = Vec::new();
        let mut body = Vec::new();
        for child in &node.children {
            match child.kind {
                NodeKind::TableHead => head.push(self.row(child, alignments, Tag::Th)),
                NodeKind::TableRow => body.push(self.row(child, alignments, Tag::Td)),
                _ => body.push(self.node(child)),
            }
        }

        let mut sections: Vec<VisualNode> = Vec::new();
        if !head.is_empty() {
            sections.push(Element::new(Tag::Thead).children(head).into());
        }
        if !body.is_empty() {
            sections.push(Element::new(Tag::Tbody).children(body).into());
        }
        Element::new(Tag::Table)
            .class("markdown-table")
            .children(sections)
            .into()
    }

    fn row(&mut self, row: &Node, alignments: &[Alignment], cell_tag: Tag) -> VisualNode {
        let cells = row
            .children
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let mut element = Element::new(cell_tag);
                if let Some(align) = alignments.get(column).and_then(|a| text_align(*a)) {
                    element = element.attr("style", format!("text-align: {align}"));
                }
                element.children(self.nodes(&cell.children)).into()
            })
            .collect();
        Element::new(Tag::Tr).children(cells).into()
    }

    fn code_block(&mut self, block: &CodeBlock) -> VisualNode {
        let id = BlockId::new(self.next_ordinal, &block.raw_text);
        self.next_ordinal += 1;
        let nesting_level = self.context.nesting_level;

        if block.is_markdown() {
            if nesting_level < MAX_NESTING_LEVEL {
                return VisualNode::DualView(DualView {
                    id,
                    mode: self.context.view_modes.mode(&id),
                    raw_text: block.raw_text.clone(),
                    nesting_level,
                    source: self.highlighter.highlight(&block.raw_text, "markdown"),
                });
            }
            log::debug!(
                "Nesting level {nesting_level} reached the ceiling, showing markdown block {id} as source"
            );
        }

        VisualNode::Code(self.highlighter.highlight(&block.raw_text, &block.language))
    }
}

fn text_align(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}
