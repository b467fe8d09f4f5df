//! Validation of workflow graphs.
//!
//! Uses Stillwater's `Validation` to report every structural problem of a
//! specification in one pass instead of stopping at the first.

pub mod rules;
pub mod violations;

pub use rules::GraphValidation;
pub use violations::GraphViolation;
