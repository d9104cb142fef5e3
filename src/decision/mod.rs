//! Business decision from the model probability.

mod engine;

pub use engine::{decide, Decision, DecisionEngine, PredictionResult};
