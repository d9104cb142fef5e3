//! ONNX Runtime inference for subscription probability. Input: [1, n_features] f32.
//! Output: class probabilities, either a `[1, n_classes]` tensor or the `seq(map(int64, float))`
//! produced by scikit-learn converters with zipmap enabled.

use super::Classifier;
use crate::error::{AppError, ArtifactError, Result};
use crate::features::FeatureVector;
use ort::memory::Allocator;
use ort::session::{Session, SessionOutputs};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

fn onnx_err(e: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::Onnx(e.to_string())
}

pub struct OnnxClassifier {
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    feature_dim: usize,
}

impl OnnxClassifier {
    /// Load model from path; a missing or unreadable model is an error.
    pub fn load(path: &Path, feature_dim: usize) -> std::result::Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "model file not found"),
            });
        }

        let session = Session::builder()
            .map_err(onnx_err)?
            .commit_from_file(path)
            .map_err(onnx_err)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "probabilities".to_string());

        info!(
            path = %path.display(),
            input = %input_name,
            output = %output_name,
            feature_dim,
            "ONNX model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            feature_dim,
        })
    }

    fn class_one_probability(&self, outputs: &SessionOutputs) -> Result<f64> {
        if let Some(output) = outputs.get(self.output_name.as_str()) {
            if let Some(p) = probability_from_value(output) {
                return Ok(p);
            }
        }

        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Some(p) = probability_from_value(&output) {
                debug!(output = %name, "probability read from fallback output");
                return Ok(p);
            }
        }

        Err(AppError::Inference(
            "model produced no readable probability output".into(),
        ))
    }
}

fn probability_from_value(output: &DynValue) -> Option<f64> {
    if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
        return class_one_from_tensor(shape.last().copied().unwrap_or(1), data);
    }

    if DynSequenceValueType::can_downcast(&output.dtype()) {
        return probability_from_sequence_map(output);
    }

    None
}

/// `seq(map(int64, float))`: one map per row, keyed by class label.
fn probability_from_sequence_map(output: &DynValue) -> Option<f64> {
    let allocator = Allocator::default();
    let sequence = output.downcast_ref::<DynSequenceValueType>().ok()?;
    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .ok()?;
    let row = maps.first()?.try_extract_key_values::<i64, f32>().ok()?;
    class_one_from_map(&row)
}

/// First row of a `[rows, classes]` tensor. A single column is already P(class 1).
fn class_one_from_tensor(classes: i64, data: &[f32]) -> Option<f64> {
    let idx = if classes >= 2 { 1 } else { 0 };
    data.get(idx).map(|p| f64::from(*p))
}

/// Class 1 entry, else the complement of class 0.
fn class_one_from_map(row: &[(i64, f32)]) -> Option<f64> {
    if let Some((_, p)) = row.iter().find(|(class, _)| *class == 1) {
        return Some(f64::from(*p));
    }
    row.iter()
        .find(|(class, _)| *class == 0)
        .map(|(_, p)| 1.0 - f64::from(*p))
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.feature_dim {
            return Err(AppError::Inference(format!(
                "expected {} features, got {}",
                self.feature_dim,
                features.len()
            )));
        }

        let shape = vec![1_i64, self.feature_dim as i64];
        let input = Tensor::from_array((shape, features.values.clone()))
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AppError::Inference("ONNX session lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let p = self.class_one_probability(&outputs)?;
        if !p.is_finite() {
            return Err(AppError::Inference("non-finite probability".into()));
        }
        Ok(p.clamp(0.0, 1.0))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
