use crate::analysis::FunctionScan;
use crate::core::{AnalysisContext, Finding, Rule, VulnerabilityKind};

/// Line-order reentrancy heuristic: an external call followed on a later
/// source line by a state assignment in the same function. The finding is
/// anchored at the assignment, the site that should have moved before the
/// call. Control flow is intentionally not modeled; a call inside a branch
/// followed by an assignment outside it still matches.
pub struct ReentrancyRule;

impl Rule for ReentrancyRule {
    fn id(&self) -> &'static str {
        "reentrancy"
    }

    fn check(&self, function: &FunctionScan, context: &AnalysisContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for &call_line in &function.external_calls {
            let later_assignment = function
                .state_assignments
                .iter()
                .find(|&&line| line > call_line);

            if let Some(&assignment_line) = later_assignment {
                findings.push(Finding::located(
                    VulnerabilityKind::Reentrancy,
                    assignment_line,
                    context,
                ));
            }
        }

        findings
    }
}
