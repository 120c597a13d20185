//! Syntax highlighting for code blocks, backed by syntect.
//!
//! Syntax and theme definitions are loaded once per process. Highlighting never fails:
//! unknown languages use the plain text syntax and lines that syntect rejects are kept
//! as unstyled text.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Dark palette used when no theme is configured or the configured one is unknown.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Name of a theme from syntect's default theme set.
    pub theme: String,
    pub show_line_numbers: bool,
    pub wrap_long_lines: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            show_line_numbers: true,
            wrap_long_lines: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<syntect::highlighting::Color> for Rgb {
    fn from(color: syntect::highlighting::Color) -> Self {
        Rgb(color.r, color.g, color.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub color: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyledSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    fn from_syntect(style: Style, text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: Some(style.foreground.into()),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }

    /// Inline CSS for this span.
    pub fn css(&self) -> String {
        let mut css = String::new();
        if let Some(color) = self.color {
            css.push_str(&format!("color: {};", color.hex()));
        }
        if self.bold {
            css.push_str("font-weight: bold;");
        }
        if self.italic {
            css.push_str("font-style: italic;");
        }
        if self.underline {
            css.push_str("text-decoration: underline;");
        }
        css
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// 1-based line number.
    pub number: usize,
    pub spans: Vec<StyledSpan>,
}

impl HighlightedLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// A code block after highlighting, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    pub language: String,
    pub lines: Vec<HighlightedLine>,
    pub show_line_numbers: bool,
    pub wrap_long_lines: bool,
    pub background: Option<Rgb>,
}

impl HighlightedCode {
    /// The source text, reassembled from the highlighted lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(HighlightedLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Highlights code with a fixed theme and display options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlighter {
    options: HighlightOptions,
}

impl Highlighter {
    pub fn new(options: HighlightOptions) -> Self {
        Self { options }
    }

    pub fn highlight(&self, code: &str, language: &str) -> HighlightedCode {
        let theme = theme_named(&self.options.theme);
        let syntax = syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines: Vec<HighlightedLine> = LinesWithEndings::from(code)
            .enumerate()
            .map(|(index, line)| {
                let spans = match highlighter.highlight_line(line, &SYNTAX_SET) {
                    Ok(ranges) => ranges
                        .into_iter()
                        .map(|(style, text)| StyledSpan::from_syntect(style, trim_newline(text)))
                        .filter(|span| !span.text.is_empty())
                        .collect(),
                    Err(e) => {
                        log::debug!("Falling back to plain text for {language} line: {e}");
                        vec![StyledSpan::plain(trim_newline(line))]
                    }
                };
                HighlightedLine {
                    number: index + 1,
                    spans,
                }
            })
            .collect();
        // A trailing newline starts one more, empty, line.
        if code.ends_with('\n') {
            lines.push(HighlightedLine {
                number: lines.len() + 1,
                spans: Vec::new(),
            });
        }

        HighlightedCode {
            language: language.to_string(),
            lines,
            show_line_numbers: self.options.show_line_numbers,
            wrap_long_lines: self.options.wrap_long_lines,
            background: theme.settings.background.map(Into::into),
        }
    }
}

fn syntax_for(language: &str) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(language)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn theme_named(name: &str) -> &'static Theme {
    if let Some(theme) = THEME_SET.themes.get(name) {
        return theme;
    }
    log::warn!("Unknown highlight theme '{name}', using {DEFAULT_THEME}");
    &THEME_SET.themes[DEFAULT_THEME]
}

fn trim_newline(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

/// Names of the themes that can be configured.
pub fn available_themes() -> Vec<&'static str> {
    THEME_SET.themes.keys().map(String::as_str).collect()
}
