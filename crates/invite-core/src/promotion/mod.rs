//! Promotion rules - pure evaluation of invite totals against a rank table

mod evaluator;

pub use evaluator::{evaluate, PromotionResult};
