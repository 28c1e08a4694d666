use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "https://nest.owasp.dev";

const LIST_PAGE_SIZE: usize = 200;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GuidelineError {
    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("response decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    pub key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDetail {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    items: Vec<ProjectSummary>,
}

/// The knowledge-base surface the resolver consumes. Abstracted behind a
/// trait so tests can substitute an in-memory directory.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, GuidelineError>;

    async fn project_detail(&self, key: &str) -> Result<ProjectDetail, GuidelineError>;
}

/// REST client for the OWASP Nest project directory.
#[derive(Clone)]
pub struct NestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NestClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GuidelineError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("soliscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GuidelineError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, GuidelineError> {
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| GuidelineError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuidelineError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GuidelineError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProjectDirectory for NestClient {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, GuidelineError> {
        let url = format!(
            "{}/api/v1/projects?page_size={LIST_PAGE_SIZE}",
            self.base_url
        );
        let list: ProjectList = self.get_json(url).await?;
        Ok(list.items)
    }

    async fn project_detail(&self, key: &str) -> Result<ProjectDetail, GuidelineError> {
        let url = format!("{}/api/v1/projects/{key}", self.base_url);
        self.get_json(url).await
    }
}
