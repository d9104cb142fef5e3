//! Trained classifiers. Each returns the class-1 (subscribes) probability for one aligned row.

mod linear;
mod onnx;

pub use linear::{LinearClassifier, LinearModelFile};
pub use onnx::OnnxClassifier;

use crate::error::{ArtifactError, Result};
use crate::features::FeatureVector;
use std::path::Path;

pub trait Classifier: Send + Sync {
    /// Probability in [0, 1] that the customer subscribes.
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64>;

    /// Short model kind for logs
    fn kind(&self) -> &'static str;
}

/// Load the model artifact, picking the implementation from the file extension.
pub fn load_classifier(
    path: &Path,
    schema: &[String],
) -> std::result::Result<Box<dyn Classifier>, ArtifactError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("onnx") => Ok(Box::new(OnnxClassifier::load(path, schema.len())?)),
        Some("json") => Ok(Box::new(LinearClassifier::load(path, schema)?)),
        _ => Err(ArtifactError::UnsupportedModelFormat(path.to_path_buf())),
    }
}
