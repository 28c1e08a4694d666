//! The four heuristic detectors. Each rule is independent and pure; the
//! engine runs them per function in a fixed order and deduplicates the
//! combined output.

pub mod access_control;
pub mod low_level_call;
pub mod reentrancy;
pub mod unchecked_arithmetic;

pub use access_control::{AccessControlRule, ACCESS_CONTROL_MODIFIERS};
pub use low_level_call::LowLevelCallRule;
pub use reentrancy::ReentrancyRule;
pub use unchecked_arithmetic::UncheckedArithmeticRule;

use crate::core::Rule;

/// The standard rule set, in the order findings are emitted per function.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AccessControlRule),
        Box::new(LowLevelCallRule),
        Box::new(ReentrancyRule),
        Box::new(UncheckedArithmeticRule),
    ]
}
