//! HTTP client for the guide backend and the research summarizer.
//!
//! The listing, content and research calls log failures and degrade to an empty or
//! missing result. Guide creation surfaces a [`ClientError`] so the caller can show
//! a retry message.

mod client;
mod models;

pub use client::GuideClient;
pub use models::{
    CreateGuideRequest, CreateGuideResponse, Guide, GuideContent, ResearchReport, Summary,
    TaskOutput, TaskState, TaskStatus, TokenUsage, UNTITLED_GUIDE,
};

/// Error types for backend requests
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to create guide")]
    CreateGuide(#[source] Box<ClientError>),
}

/// Result type for backend requests
pub type Result<T> = std::result::Result<T, ClientError>;
