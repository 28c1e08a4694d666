//! Guideline enrichment: maps each finding kind to remediation text drawn
//! from the OWASP Nest project directory, degrading to a static per-kind
//! fallback whenever the remote side is unavailable. Enrichment runs after
//! detection and can never block or fail it.

pub mod client;
pub mod mock;
pub mod resolver;

pub use client::{
    GuidelineError, NestClient, ProjectDetail, ProjectDirectory, ProjectSummary,
    DEFAULT_SERVER_URL,
};
pub use mock::StaticProjectDirectory;
pub use resolver::GuidelineResolver;
