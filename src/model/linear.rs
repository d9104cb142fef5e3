//! Logistic-regression classifier stored as JSON weights keyed by column name.

use super::Classifier;
use crate::error::{AppError, ArtifactError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk form: `{"intercept": -2.1, "coefficients": {"age": 0.01, "job_admin.": 0.3}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelFile {
    pub intercept: f64,
    #[serde(default)]
    pub coefficients: HashMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    intercept: f64,
    /// One weight per schema column; columns without a coefficient weigh 0
    weights: Vec<f64>,
}

impl LinearClassifier {
    /// Resolve coefficients against the schema. A coefficient for a column the schema
    /// does not list means model and schema come from different training runs.
    pub fn from_model(
        model: LinearModelFile,
        schema: &[String],
    ) -> std::result::Result<Self, ArtifactError> {
        let index: HashMap<&str, usize> = schema
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut weights = vec![0.0; schema.len()];
        for (column, weight) in model.coefficients {
            let Some(&idx) = index.get(column.as_str()) else {
                return Err(ArtifactError::UnknownCoefficient(column));
            };
            weights[idx] = weight;
        }

        Ok(Self {
            intercept: model.intercept,
            weights,
        })
    }

    pub fn load(path: &Path, schema: &[String]) -> std::result::Result<Self, ArtifactError> {
        let data = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: LinearModelFile =
            serde_json::from_str(&data).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_model(model, schema)
    }

    fn logit(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * f64::from(*x))
                .sum::<f64>()
    }
}

impl Classifier for LinearClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(AppError::Inference(format!(
                "expected {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        let p = 1.0 / (1.0 + (-self.logit(features)).exp());
        if !p.is_finite() {
            return Err(AppError::Inference("non-finite probability".into()));
        }
        Ok(p.clamp(0.0, 1.0))
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}
