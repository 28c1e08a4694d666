//! Soliscan: heuristic security scanning for Solidity source.
//!
//! The detection engine is a synchronous syntactic scanner: it parses a
//! source file, collects per-function assignment/call/arithmetic sites in
//! two bounded passes, and runs four independent rules over the collected
//! data. It trades soundness for speed and simplicity; findings are
//! heuristic by design. The guideline resolver is a separate, asynchronous
//! collaborator consulted after detection.

pub mod analysis;
pub mod core;
pub mod engine;
pub mod guidelines;
pub mod report;
pub mod rules;
pub mod syntax;

pub use crate::core::{AnalysisContext, EnrichedFinding, Finding, Rule, VulnerabilityKind};
pub use crate::engine::DetectionEngine;
pub use crate::guidelines::GuidelineResolver;
pub use crate::report::{ScanReport, ScanStatus};
pub use crate::syntax::ParseError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
