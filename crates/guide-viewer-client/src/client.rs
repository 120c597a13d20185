//! Guide backend client implementation

use crate::models::{
    CreateGuideRequest, CreateGuideResponse, Guide, GuideContent, ResearchReport, TaskStatus,
};
use crate::{ClientError, Result};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the guide flow endpoints and the research summarizer
#[derive(Debug, Clone)]
pub struct GuideClient {
    client: reqwest::Client,
    api_base_url: String,
    summarizer_url: String,
}

impl GuideClient {
    /// Create a client for the given backends
    ///
    /// # Arguments
    /// * `api_base_url` - Base URL of the guide backend (e.g., "http://localhost:8000")
    /// * `summarizer_url` - Base URL of the research summarizer (e.g., "http://localhost:8045")
    pub fn new(api_base_url: impl Into<String>, summarizer_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(600)) // research runs can take minutes
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_base_url: api_base_url.into(),
            summarizer_url: summarizer_url.into(),
        }
    }

    /// List generated guides. Logs and returns an empty list on failure.
    pub async fn list_guides(&self) -> Vec<Guide> {
        match self
            .get_json::<Vec<Guide>>(&self.api_base_url, &["flow", "list_guides"])
            .await
        {
            Ok(guides) => guides,
            Err(e) => {
                log::error!("Error fetching guide list: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch the markdown of one guide. Logs and returns `None` on failure.
    pub async fn fetch_guide_content(&self, task_id: &str) -> Option<GuideContent> {
        match self
            .get_json::<GuideContent>(&self.api_base_url, &["flow", "guide_content", task_id])
            .await
        {
            Ok(content) => Some(content),
            Err(e) => {
                log::error!("Error fetching guide content for {task_id}: {e}");
                None
            }
        }
    }

    /// Ask the backend to start generating a guide.
    pub async fn create_guide(&self, request: &CreateGuideRequest) -> Result<CreateGuideResponse> {
        self.post_json::<_, CreateGuideResponse>(
            &self.api_base_url,
            &["flow", "create_guide"],
            request,
        )
        .await
        .map_err(|e| {
            log::error!("Error creating guide: {e}");
            ClientError::CreateGuide(Box::new(e))
        })
    }

    /// Poll the generation state of a guide. Logs and returns `None` on failure.
    pub async fn task_status(&self, task_id: &str) -> Option<TaskStatus> {
        match self
            .get_json::<TaskStatus>(&self.api_base_url, &["flow", "task_status", task_id])
            .await
        {
            Ok(status) => Some(status),
            Err(e) => {
                log::error!("Error fetching task status for {task_id}: {e}");
                None
            }
        }
    }

    /// Run the research crew on a topic. Empty topics are not sent.
    pub async fn run_research(&self, topic: &str) -> Option<ResearchReport> {
        if topic.trim().is_empty() {
            return None;
        }
        let body = serde_json::json!({ "topic": topic });
        match self
            .post_json::<_, ResearchReport>(&self.summarizer_url, &["run-research"], &body)
            .await
        {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("Error fetching summary: {e}");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, base: &str, segments: &[&str]) -> Result<T> {
        let url = endpoint_url(base, segments)?;
        let response = self.client.get(url.clone()).send().await?;
        Self::parse(&url, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        base: &str,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = endpoint_url(base, segments)?;
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::parse(&url, response).await
    }

    async fn parse<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Append path segments to a base URL, percent-encoding each one. A trailing slash
/// on the base is ignored.
fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = || ClientError::InvalidUrl(base.to_string());
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskState;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GuideClient {
        GuideClient::new(server.uri(), server.uri())
    }

    #[tokio::test]
    async fn test_list_guides_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/list_guides"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"task_id": "t1", "title": "Intro to Rust", "file": "output/t1.md"},
                {"task_id": "t2", "file": "output/t2.md"}
            ])))
            .mount(&server)
            .await;

        let guides = client_for(&server).list_guides().await;

        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].display_title(), "Intro to Rust");
        assert_eq!(guides[1].display_title(), "Untitled Guide");
    }

    #[tokio::test]
    async fn test_list_guides_server_error_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/list_guides"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client_for(&server).list_guides().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_guide_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/guide_content/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "t1",
                "content": "# Intro\n\nBody"
            })))
            .mount(&server)
            .await;

        let content = client_for(&server).fetch_guide_content("t1").await.unwrap();

        assert_eq!(content.task_id, "t1");
        assert_eq!(content.content, "# Intro\n\nBody");
    }

    #[tokio::test]
    async fn test_fetch_missing_guide_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/guide_content/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client_for(&server).fetch_guide_content("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_create_guide_posts_topic_and_level() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/flow/create_guide"))
            .and(body_json(serde_json::json!({
                "topic": "Ownership",
                "audience_level": "beginner"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Guide creation started",
                "task_id": "t9"
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .create_guide(&CreateGuideRequest {
                topic: "Ownership".to_string(),
                audience_level: "beginner".to_string(),
            })
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Guide creation started");
        assert_eq!(response.task_id.as_deref(), Some("t9"));
    }

    #[tokio::test]
    async fn test_create_guide_failure_is_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/flow/create_guide"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_guide(&CreateGuideRequest {
                topic: "x".to_string(),
                audience_level: "y".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to create guide");
    }

    #[tokio::test]
    async fn test_task_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/task_status/t9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "t9",
                "status": "completed"
            })))
            .mount(&server)
            .await;

        let status = client_for(&server).task_status("t9").await.unwrap();
        assert_eq!(status.status, TaskState::Completed);
    }

    #[tokio::test]
    async fn test_run_research() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/run-research"))
            .and(body_json(serde_json::json!({"topic": "AI agents"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "topic": "AI agents",
                "summary": {
                    "raw": "## Findings\n\n- one",
                    "tasks_output": [],
                    "token_usage": {"total_tokens": 42}
                }
            })))
            .mount(&server)
            .await;

        let report = client_for(&server).run_research("AI agents").await.unwrap();

        assert_eq!(report.topic, "AI agents");
        assert_eq!(report.summary.raw, "## Findings\n\n- one");
        assert_eq!(report.summary.token_usage.total_tokens, 42);
    }

    #[tokio::test]
    async fn test_run_research_skips_empty_topic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client_for(&server).run_research("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_task_id_is_encoded_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flow/guide_content/a%20b%2Fc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "a b/c",
                "content": "body"
            })))
            .mount(&server)
            .await;

        let content = client_for(&server).fetch_guide_content("a b/c").await.unwrap();
        assert_eq!(content.task_id, "a b/c");
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let url = endpoint_url("http://localhost:8000/", &["flow", "list_guides"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/flow/list_guides");
    }

    #[test]
    fn test_base_url_path_is_kept() {
        let url = endpoint_url("http://gateway.local/api/", &["run-research"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/api/run-research");
    }

    #[tokio::test]
    async fn test_invalid_base_url_degrades() {
        let client = GuideClient::new("not a url", "also not a url");

        assert!(client.list_guides().await.is_empty());
        assert!(client.run_research("topic").await.is_none());
        let err = client
            .create_guide(&CreateGuideRequest {
                topic: "x".to_string(),
                audience_level: "y".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create guide");
    }
}
