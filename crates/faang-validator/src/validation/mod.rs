//! Per-record validation: rule evaluation and its findings.

mod evaluator;
mod outcome;

pub use evaluator::FieldRuleEvaluator;
pub use outcome::{ErrorClass, FieldError, ValidationOutcome};
