//! The two collection passes that feed the rule detectors: the per-function
//! body scan and pragma version reasoning.

pub mod function_scanner;
pub mod version;

pub use function_scanner::{
    scan_functions, FunctionScan, Mutability, Visibility, LOW_LEVEL_CALLS,
};
pub use version::{first_version_triple, requires_overflow_guard, SolidityVersion};
