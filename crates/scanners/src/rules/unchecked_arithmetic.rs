use crate::analysis::{requires_overflow_guard, FunctionScan};
use crate::core::{AnalysisContext, Finding, Rule, VulnerabilityKind};

/// Flags `+ - * /` sites in files whose declared compiler version predates
/// built-in overflow checks (or declares no parseable version at all). A
/// single `using SafeMath` directive anywhere in the file silences the rule
/// for every function; that is an accepted over-approximation.
pub struct UncheckedArithmeticRule;

impl Rule for UncheckedArithmeticRule {
    fn id(&self) -> &'static str {
        "unchecked-arithmetic"
    }

    fn check(&self, function: &FunctionScan, context: &AnalysisContext) -> Vec<Finding> {
        if function.arithmetic_sites.is_empty() {
            return Vec::new();
        }
        if !requires_overflow_guard(context.pragma_version()) {
            return Vec::new();
        }
        if uses_safemath(context.source_lines()) {
            return Vec::new();
        }

        function
            .arithmetic_sites
            .iter()
            .map(|&line| Finding::located(VulnerabilityKind::UncheckedArithmetic, line, context))
            .collect()
    }
}

fn uses_safemath(source_lines: &[String]) -> bool {
    source_lines.iter().any(|line| mentions_safemath(line))
}

// Matches `using` followed by whitespace followed by `SafeMath`, anywhere
// in the line.
fn mentions_safemath(line: &str) -> bool {
    let mut rest = line;
    while let Some(position) = rest.find("using") {
        let after = &rest[position + "using".len()..];
        let trimmed = after.trim_start();
        if trimmed.len() < after.len() && trimmed.starts_with("SafeMath") {
            return true;
        }
        rest = after;
    }
    false
}
