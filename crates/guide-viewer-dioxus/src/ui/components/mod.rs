mod code_view;
mod create_guide;
mod dual_view_block;
mod error_screen;
mod guide_details;
mod guide_list;
mod markdown_renderer;
mod research_summarizer;
mod sidebar;

pub use code_view::CodeView;
pub use create_guide::CreateGuide;
pub use dual_view_block::DualViewBlock;
pub use error_screen::ErrorScreen;
pub use guide_details::{GuideDetails, GuideDetailsView};
pub use guide_list::{GuideList, GuideListView};
pub use markdown_renderer::MarkdownRenderer;
pub use research_summarizer::{ReportView, ResearchSummarizer};
pub use sidebar::Sidebar;
