// Signal evaluation
pub mod evaluator;

pub use evaluator::{EvaluatorConfig, SignalEvaluator};
