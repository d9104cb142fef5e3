//! Subscription API — scores bank-marketing customers for term-deposit propensity.
//!
//! Modular structure:
//! - [`features`] — Request validation, derived fields, one-hot encoding aligned to the training schema
//! - [`model`] — Classifier inference (ONNX or JSON logistic regression)
//! - [`decision`] — Business threshold and decision label
//! - [`artifacts`] — Startup loading of model, schema and threshold
//! - [`api`] — HTTP routes and handlers
//! - [`logging`] — Structured JSON logging

pub mod api;
pub mod artifacts;
pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;

pub use api::{build_router, AppState};
pub use artifacts::ServingContext;
pub use config::ServiceConfig;
pub use decision::{Decision, DecisionEngine, PredictionResult};
pub use error::{AppError, ArtifactError};
pub use features::{CustomerRecord, FeatureLayout, FeatureVector};
pub use logging::StructuredLogger;
pub use model::{Classifier, LinearClassifier, OnnxClassifier};
