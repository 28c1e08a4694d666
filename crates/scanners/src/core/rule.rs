use crate::analysis::FunctionScan;
use crate::core::context::AnalysisContext;
use crate::core::result::Finding;

/// A single heuristic detector.
///
/// Rules run over data the function scanner already collected, so they are
/// pure and infallible; every failure mode in the engine is handled before
/// rules execute. Rules are independent and order-insensitive. Ordering of
/// the final report is fixed by the engine's iteration order plus
/// first-seen deduplication.
pub trait Rule: Send + Sync {
    /// Stable identifier, used by the engine when logging which rule fired.
    fn id(&self) -> &'static str;

    fn check(&self, function: &FunctionScan, context: &AnalysisContext) -> Vec<Finding>;
}
