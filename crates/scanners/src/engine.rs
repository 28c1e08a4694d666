//! Scan orchestration.
//!
//! One `analyze` call is one synchronous pass: parse, build the analysis
//! context, collect per-function sites, run every rule over every function,
//! deduplicate. Nothing is shared between calls, so concurrent scans need
//! no coordination.
//!
//! Parse failure is the only error path and it never propagates: it is
//! converted into a single parser-error finding and no rules run.

use crate::analysis::scan_functions;
use crate::core::{AnalysisContext, Finding, Rule};
use crate::rules::default_rules;
use crate::syntax;
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct DetectionEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl DetectionEngine {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Analyze one Solidity source file and return deduplicated findings in
    /// first-seen order. An empty result means no rule matched.
    pub fn analyze(&self, source: &str) -> Vec<Finding> {
        let parsed = match syntax::parse(source) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "source rejected by parser");
                return vec![Finding::parser_error(error)];
            }
        };

        let context = AnalysisContext::build(&parsed, source);
        let functions = scan_functions(&parsed, &context, source);

        let mut findings = Vec::new();
        for function in &functions {
            for rule in &self.rules {
                let matched = rule.check(function, &context);
                if !matched.is_empty() {
                    debug!(rule = rule.id(), count = matched.len(), "rule matched");
                }
                findings.extend(matched);
            }
        }

        dedupe_findings(findings)
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the first finding per `(name, line, snippet)` key, preserving the
/// relative order of first occurrences.
pub fn dedupe_findings(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|finding| seen.insert(finding.dedup_key()))
        .collect()
}
