//! Core types shared by the detection engine: the per-scan analysis
//! context, the finding data model, and the rule trait detectors implement.

pub mod context;
pub mod result;
pub mod rule;

pub use context::{AnalysisContext, SNIPPET_RADIUS};
pub use result::{EnrichedFinding, Finding, VulnerabilityKind};
pub use rule::Rule;
