use crate::analysis::FunctionScan;
use crate::core::{AnalysisContext, Finding, Rule, VulnerabilityKind};

/// One finding per collected low-level call site. Same-line duplicates are
/// merged by the global deduplicator, not here.
pub struct LowLevelCallRule;

impl Rule for LowLevelCallRule {
    fn id(&self) -> &'static str {
        "low-level-call"
    }

    fn check(&self, function: &FunctionScan, context: &AnalysisContext) -> Vec<Finding> {
        function
            .external_calls
            .iter()
            .map(|&line| Finding::located(VulnerabilityKind::LowLevelCallUsage, line, context))
            .collect()
    }
}
