pub mod highlight;
pub mod parsing;
pub mod render;
pub mod view_mode;

// Re-export key types for easier usage
pub use highlight::{HighlightOptions, HighlightedCode, Highlighter};
pub use parsing::{CodeBlock, Document, parse_document};
pub use render::{
    DualView, Element, MAX_NESTING_LEVEL, RenderContext, Renderer, Tag, VisualNode, VisualTree,
    render,
};
pub use view_mode::{BlockId, ViewMode, ViewModes};
