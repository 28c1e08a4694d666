use crate::core::{EnrichedFinding, Finding, VulnerabilityKind};
use crate::guidelines::client::{
    NestClient, ProjectDetail, ProjectDirectory, ProjectSummary, DEFAULT_SERVER_URL,
};
use lru::LruCache;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

const LIST_TIMEOUT: Duration = Duration::from_secs(8);
const DETAIL_TIMEOUT: Duration = Duration::from_secs(3);
const KIND_TIMEOUT: Duration = Duration::from_secs(5);

const DETAIL_CACHE_CAPACITY: usize = 512;
const MAX_GUIDELINE_LEN: usize = 320;

/// Maps finding kinds to remediation guidance.
///
/// The project-detail cache lives on the resolver instance: reuse one
/// resolver across scans and details fetched once are remembered for the
/// process lifetime; the per-kind memo lives inside a single `enrich` call,
/// so each kind is looked up at most once per scan. Every failure mode
/// (missing credential, network error, timeout) degrades to the static
/// per-kind fallback; enrichment can never fail a scan.
pub struct GuidelineResolver {
    directory: Option<Arc<dyn ProjectDirectory>>,
    detail_cache: Arc<RwLock<LruCache<String, ProjectDetail>>>,
}

impl GuidelineResolver {
    pub fn new(directory: Arc<dyn ProjectDirectory>) -> Self {
        Self {
            directory: Some(directory),
            detail_cache: new_detail_cache(),
        }
    }

    /// A resolver that never touches the network and always answers with
    /// the static fallback table.
    pub fn offline() -> Self {
        Self {
            directory: None,
            detail_cache: new_detail_cache(),
        }
    }

    /// Reads `NEST_API_KEY` / `NEST_API_BASE_URL`. Without a key the
    /// resolver runs offline.
    pub fn from_env() -> Self {
        match std::env::var("NEST_API_KEY") {
            Ok(key) if !key.is_empty() => {
                let base_url = std::env::var("NEST_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
                match NestClient::new(key, base_url) {
                    Ok(client) => Self::new(Arc::new(client)),
                    Err(error) => {
                        warn!(%error, "knowledge-base client unavailable, using static guidelines");
                        Self::offline()
                    }
                }
            }
            _ => {
                debug!("NEST_API_KEY not set, using static guidelines");
                Self::offline()
            }
        }
    }

    /// Augments every finding with a guideline string. The string is always
    /// present in the result.
    pub async fn enrich(&self, findings: Vec<Finding>) -> Vec<EnrichedFinding> {
        if findings.is_empty() {
            return Vec::new();
        }

        let Some(directory) = self.directory.as_ref() else {
            return fallback_all(findings);
        };

        let projects =
            match tokio::time::timeout(LIST_TIMEOUT, directory.list_projects()).await {
                Ok(Ok(projects)) => Arc::new(projects),
                Ok(Err(error)) => {
                    warn!(%error, "project listing failed, using static guidelines");
                    return fallback_all(findings);
                }
                Err(_) => {
                    warn!("project listing timed out, using static guidelines");
                    return fallback_all(findings);
                }
            };

        // Distinct kinds resolve concurrently; each at most once per call.
        let mut kinds: Vec<VulnerabilityKind> = Vec::new();
        for finding in &findings {
            if !kinds.contains(&finding.kind) {
                kinds.push(finding.kind);
            }
        }

        let mut lookups = JoinSet::new();
        for kind in kinds {
            let directory = Arc::clone(directory);
            let projects = Arc::clone(&projects);
            let cache = Arc::clone(&self.detail_cache);
            lookups.spawn(async move {
                let lookup = resolve_from_projects(directory, projects, cache, kind);
                let guideline = match tokio::time::timeout(KIND_TIMEOUT, lookup).await {
                    Ok(Some(text)) => text,
                    Ok(None) => kind.fallback_guideline().to_string(),
                    Err(_) => {
                        debug!(kind = %kind, "guideline lookup timed out");
                        kind.fallback_guideline().to_string()
                    }
                };
                (kind, guideline)
            });
        }

        let mut resolved: HashMap<VulnerabilityKind, String> = HashMap::new();
        while let Some(joined) = lookups.join_next().await {
            if let Ok((kind, guideline)) = joined {
                resolved.insert(kind, guideline);
            }
        }

        findings
            .into_iter()
            .map(|finding| {
                let guideline = resolved
                    .get(&finding.kind)
                    .cloned()
                    .unwrap_or_else(|| finding.kind.fallback_guideline().to_string());
                EnrichedFinding::new(finding, guideline)
            })
            .collect()
    }
}

fn new_detail_cache() -> Arc<RwLock<LruCache<String, ProjectDetail>>> {
    let capacity = NonZeroUsize::new(DETAIL_CACHE_CAPACITY).expect("nonzero cache capacity");
    Arc::new(RwLock::new(LruCache::new(capacity)))
}

fn fallback_all(findings: Vec<Finding>) -> Vec<EnrichedFinding> {
    findings
        .into_iter()
        .map(EnrichedFinding::with_static_guideline)
        .collect()
}

async fn resolve_from_projects(
    directory: Arc<dyn ProjectDirectory>,
    projects: Arc<Vec<ProjectSummary>>,
    cache: Arc<RwLock<LruCache<String, ProjectDetail>>>,
    kind: VulnerabilityKind,
) -> Option<String> {
    let keywords: Vec<String> = kind
        .keywords()
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    for project in projects.iter() {
        let detail = fetch_detail(directory.as_ref(), &cache, &project.key).await;
        let haystack = format!("{} {}", detail.name, detail.description).to_lowercase();

        if keywords.iter().any(|keyword| haystack.contains(keyword)) {
            return Some(trim_description(&detail.description));
        }
    }

    None
}

// Failed fetches are answered with an empty detail and are not cached, so a
// later scan can retry.
async fn fetch_detail(
    directory: &dyn ProjectDirectory,
    cache: &RwLock<LruCache<String, ProjectDetail>>,
    key: &str,
) -> ProjectDetail {
    if let Some(detail) = cache.write().get(key).cloned() {
        return detail;
    }

    match tokio::time::timeout(DETAIL_TIMEOUT, directory.project_detail(key)).await {
        Ok(Ok(detail)) => {
            cache.write().put(key.to_string(), detail.clone());
            detail
        }
        Ok(Err(error)) => {
            debug!(%error, key, "project detail fetch failed");
            empty_detail(key)
        }
        Err(_) => {
            debug!(key, "project detail fetch timed out");
            empty_detail(key)
        }
    }
}

fn empty_detail(key: &str) -> ProjectDetail {
    ProjectDetail {
        key: key.to_string(),
        ..Default::default()
    }
}

fn trim_description(description: &str) -> String {
    let description = description.trim();
    if description.chars().count() <= MAX_GUIDELINE_LEN {
        return description.to_string();
    }

    let truncated: String = description.chars().take(MAX_GUIDELINE_LEN - 1).collect();
    format!("{}…", truncated.trim_end())
}
