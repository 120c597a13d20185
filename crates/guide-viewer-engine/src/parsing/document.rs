/// Parsed markdown as an owned tree of nodes.
///
/// Rebuilt from source text on every render; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// All fenced and indented code blocks in document order.
    pub fn code_blocks(&self) -> Vec<&CodeBlock> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.collect_code_blocks(&mut out);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: vec![],
        }
    }

    /// Concatenated text of this node and its descendants, used for image alt text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CodeSpan(text) => out.push_str(text),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {}
        }
        for child in &self.children {
            child.push_plain_text(out);
        }
    }

    fn collect_code_blocks<'a>(&'a self, out: &mut Vec<&'a CodeBlock>) {
        if let NodeKind::CodeBlock(block) = &self.kind {
            out.push(block);
        }
        for child in &self.children {
            child.collect_code_blocks(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Paragraph,
    /// Heading level 1 to 6.
    Heading(u8),
    BlockQuote,
    /// `start` is `Some` for ordered lists.
    List {
        start: Option<u64>,
    },
    ListItem,
    TaskMarker {
        checked: bool,
    },
    Table {
        alignments: Vec<Alignment>,
    },
    /// Header cells of a table, without an intermediate row.
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link {
        href: String,
        title: String,
    },
    /// Alt text lives in the children.
    Image {
        src: String,
        title: String,
    },
    CodeSpan(String),
    CodeBlock(CodeBlock),
    /// Raw HTML block, passed through unescaped.
    Html(String),
    InlineHtml(String),
    FootnoteReference(String),
    FootnoteDefinition(String),
    Text(String),
    SoftBreak,
    HardBreak,
    Rule,
    /// Anything without a dedicated rendering; children are kept.
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(value: pulldown_cmark::Alignment) -> Self {
        match value {
            pulldown_cmark::Alignment::None => Alignment::None,
            pulldown_cmark::Alignment::Left => Alignment::Left,
            pulldown_cmark::Alignment::Center => Alignment::Center,
            pulldown_cmark::Alignment::Right => Alignment::Right,
        }
    }
}

/// A fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag from the fence info, `"text"` when missing or unusable.
    pub language: String,
    /// Literal block content with one trailing newline removed.
    pub raw_text: String,
}

impl CodeBlock {
    pub fn is_markdown(&self) -> bool {
        self.language.eq_ignore_ascii_case("markdown")
    }
}
