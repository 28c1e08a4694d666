use crate::analysis::{FunctionScan, Mutability};
use crate::core::{AnalysisContext, Finding, Rule, VulnerabilityKind};

/// Modifier names accepted as access control guards.
pub const ACCESS_CONTROL_MODIFIERS: &[&str] =
    &["onlyOwner", "onlyRole", "adminOnly", "authorized"];

/// Flags every public-facing mutator that carries no recognized guard
/// modifier. Constructors, anonymous functions and `view`/`pure` functions
/// are exempt. Only the declaration head is inspected, so an interface or
/// abstract declaration is flagged the same as an implemented function.
pub struct AccessControlRule;

impl Rule for AccessControlRule {
    fn id(&self) -> &'static str {
        "missing-access-control"
    }

    fn check(&self, function: &FunctionScan, context: &AnalysisContext) -> Vec<Finding> {
        if function.name.is_none() || function.is_constructor {
            return Vec::new();
        }
        if !function.visibility.is_public_facing() {
            return Vec::new();
        }
        if matches!(function.mutability, Mutability::View | Mutability::Pure) {
            return Vec::new();
        }
        if function
            .modifiers
            .iter()
            .any(|name| ACCESS_CONTROL_MODIFIERS.contains(&name.as_str()))
        {
            return Vec::new();
        }

        vec![Finding::located(
            VulnerabilityKind::MissingAccessControl,
            function.line,
            context,
        )]
    }
}
