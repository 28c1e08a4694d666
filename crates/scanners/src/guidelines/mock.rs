use crate::guidelines::client::{
    GuidelineError, ProjectDetail, ProjectDirectory, ProjectSummary,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory project directory for tests: fixed project set, optional
/// artificial latency, call counters.
pub struct StaticProjectDirectory {
    projects: Vec<ProjectDetail>,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticProjectDirectory {
    pub fn new(projects: Vec<ProjectDetail>) -> Self {
        Self {
            projects,
            delay: None,
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProjectDirectory for StaticProjectDirectory {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, GuidelineError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        Ok(self
            .projects
            .iter()
            .map(|p| ProjectSummary {
                key: p.key.clone(),
                name: p.name.clone(),
            })
            .collect())
    }

    async fn project_detail(&self, key: &str) -> Result<ProjectDetail, GuidelineError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        Ok(self
            .projects
            .iter()
            .find(|p| p.key == key)
            .cloned()
            .unwrap_or_else(|| ProjectDetail {
                key: key.to_string(),
                ..Default::default()
            }))
    }
}
