//! Applies the business threshold to a model probability.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Target Customer")]
    TargetCustomer,
    #[serde(rename = "Do Not Target")]
    DoNotTarget,
}

impl Decision {
    /// Inclusive: a probability equal to the threshold is targeted.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Decision::TargetCustomer
        } else {
            Decision::DoNotTarget
        }
    }

    pub fn prediction(&self) -> u8 {
        match self {
            Decision::TargetCustomer => 1,
            Decision::DoNotTarget => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decision::TargetCustomer => "Target Customer",
            Decision::DoNotTarget => "Do Not Target",
        }
    }
}

/// Outcome for a single customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    /// Rounded to 4 decimals for presentation
    #[serde(rename = "subscription_probability")]
    pub probability: f64,
    #[serde(rename = "business_decision")]
    pub decision: Decision,
}

/// Threshold a probability into a prediction and business label.
pub fn decide(probability: f64, threshold: f64) -> PredictionResult {
    let decision = Decision::from_probability(probability, threshold);
    PredictionResult {
        prediction: decision.prediction(),
        probability: round4(probability),
        decision,
    }
}

pub struct DecisionEngine {
    threshold: f64,
}

impl DecisionEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Compares the unrounded probability; only the reported value is rounded.
    pub fn decide(&self, probability: f64) -> PredictionResult {
        decide(probability, self.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Rounds the exact binary value, ties to even. Scaling by 1e4 first would
/// misround values such as 0.00025 whose product lands on an exact .5.
fn round4(p: f64) -> f64 {
    format!("{:.4}", p).parse().unwrap_or(p)
}
