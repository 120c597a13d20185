use std::sync::OnceLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, html};
use regex::Regex;

use super::document::{CodeBlock, Document, Node, NodeKind};
use super::{VOID_ELEMENTS, fence_language};

/// Builds a [`Document`] from a pulldown-cmark event stream.
///
/// Keeps a stack of open nodes; every `Start` pushes, every `End` pops into the parent.
/// Text inside code blocks and HTML blocks is accumulated on the open node instead of
/// becoming child text nodes.
///
/// pulldown-cmark reports inline HTML one tag at a time, so `<kbd>Ctrl</kbd>` arrives
/// as three events. An opening tag starts an [`InlineHtmlRun`] that buffers events
/// until its tags balance, then the run becomes a single `InlineHtml` fragment.
pub(crate) struct TreeBuilder {
    stack: Vec<Node>,
    run: Option<InlineHtmlRun>,
}

/// Events buffered between an opening inline HTML tag and its matching close.
struct InlineHtmlRun {
    events: Vec<Event<'static>>,
    /// Open HTML tags not yet closed.
    open_tags: usize,
    /// Markdown containers started inside the run and not yet ended.
    open_containers: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Group)],
            run: None,
        }
    }

    pub fn push(&mut self, event: Event<'_>) {
        let Some(run) = self.run.as_mut() else {
            match event {
                Event::InlineHtml(html) if tag_balance(&html) > 0 => {
                    self.run = Some(InlineHtmlRun {
                        events: vec![Event::InlineHtml(html.into_static())],
                        open_tags: 1,
                        open_containers: 0,
                    });
                }
                event => self.push_event(event),
            }
            return;
        };

        if matches!(event, Event::End(_)) && run.open_containers == 0 {
            // The enclosing block ends before the HTML closes; keep the events as they were.
            self.flush_run();
            self.push_event(event);
            return;
        }
        match &event {
            Event::InlineHtml(html) => {
                run.open_tags = run.open_tags.saturating_add_signed(tag_balance(html));
            }
            Event::Start(_) => run.open_containers += 1,
            Event::End(_) => run.open_containers -= 1,
            _ => {}
        }
        run.events.push(event.into_static());

        if run.open_tags == 0
            && run.open_containers == 0
            && let Some(run) = self.run.take()
        {
            let mut fragment = String::new();
            html::push_html(&mut fragment, run.events.into_iter());
            self.leaf(NodeKind::InlineHtml(fragment));
        }
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.run.take() {
            for event in run.events {
                self.push_event(event);
            }
        }
    }

    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(kind_for_tag(tag)),
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(text),
            Event::Code(code) => self.leaf(NodeKind::CodeSpan(code.into_string())),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.leaf(NodeKind::CodeSpan(math.into_string()))
            }
            Event::Html(html) => self.html(html),
            Event::InlineHtml(html) => self.leaf(NodeKind::InlineHtml(html.into_string())),
            Event::FootnoteReference(label) => {
                self.leaf(NodeKind::FootnoteReference(label.into_string()))
            }
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.leaf(NodeKind::HardBreak),
            Event::Rule => self.leaf(NodeKind::Rule),
            Event::TaskListMarker(checked) => self.leaf(NodeKind::TaskMarker { checked }),
        }
    }

    pub fn finish(mut self) -> Document {
        self.flush_run();
        // Unclosed nodes only happen on truncated streams; fold them into their parents.
        while self.stack.len() > 1 {
            self.close();
        }
        let root = self.stack.pop().unwrap_or_else(|| Node::new(NodeKind::Group));
        Document {
            nodes: root.children,
        }
    }

    fn open(&mut self, kind: NodeKind) {
        self.stack.push(Node::new(kind));
    }

    fn close(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        if let NodeKind::CodeBlock(block) = &mut node.kind {
            if block.raw_text.ends_with('\n') {
                block.raw_text.pop();
            }
        }
        self.leaf_node(node);
    }

    fn text(&mut self, text: CowStr<'_>) {
        match self.stack.last_mut().map(|node| &mut node.kind) {
            Some(NodeKind::CodeBlock(block)) => block.raw_text.push_str(&text),
            Some(NodeKind::Html(html)) => html.push_str(&text),
            _ => self.leaf(NodeKind::Text(text.into_string())),
        }
    }

    fn html(&mut self, html: CowStr<'_>) {
        match self.stack.last_mut().map(|node| &mut node.kind) {
            Some(NodeKind::Html(open)) => open.push_str(&html),
            _ => self.leaf(NodeKind::Html(html.into_string())),
        }
    }

    fn leaf(&mut self, kind: NodeKind) {
        self.leaf_node(Node::new(kind));
    }

    fn leaf_node(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }
}

/// +1 for an opening tag, -1 for a closing tag, 0 for void elements, comments and the rest.
pub(crate) fn tag_balance(html: &str) -> isize {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let tag_regex = TAG_REGEX.get_or_init(|| {
        Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9-]*)[^>]*?(/?)>$").expect("Invalid tag regex")
    });

    let Some(captures) = tag_regex.captures(html.trim()) else {
        return 0;
    };
    let name = captures[2].to_ascii_lowercase();
    if !captures[1].is_empty() {
        -1
    } else if !captures[3].is_empty() || VOID_ELEMENTS.contains(&name.as_str()) {
        0
    } else {
        1
    }
}

fn kind_for_tag(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(level as u8),
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::CodeBlock(CodeBlock {
            language: fence_language(&info),
            raw_text: String::new(),
        }),
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::CodeBlock(CodeBlock {
            language: fence_language(""),
            raw_text: String::new(),
        }),
        Tag::HtmlBlock => NodeKind::Html(String::new()),
        Tag::List(start) => NodeKind::List { start },
        Tag::Item => NodeKind::ListItem,
        Tag::FootnoteDefinition(label) => NodeKind::FootnoteDefinition(label.into_string()),
        Tag::Table(alignments) => NodeKind::Table {
            alignments: alignments.into_iter().map(Into::into).collect(),
        },
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link {
            dest_url, title, ..
        } => NodeKind::Link {
            href: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => NodeKind::Image {
            src: dest_url.into_string(),
            title: title.into_string(),
        },
        _ => NodeKind::Group,
    }
}
