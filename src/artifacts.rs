//! Training artifacts loaded once at startup and shared read-only by every request.

use crate::config::{ArtifactsConfig, EncodingConfig};
use crate::decision::{DecisionEngine, PredictionResult};
use crate::error::{ArtifactError, Result};
use crate::features::{CustomerRecord, FeatureLayout};
use crate::model::{load_classifier, Classifier};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

fn read_json<T: DeserializeOwned>(path: &Path) -> std::result::Result<T, ArtifactError> {
    let data = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Ordered feature columns. Must be non-empty with no repeats.
pub fn load_schema(path: &Path) -> std::result::Result<Vec<String>, ArtifactError> {
    let columns: Vec<String> = read_json(path)?;
    validate_schema(&columns)?;
    Ok(columns)
}

pub fn validate_schema(columns: &[String]) -> std::result::Result<(), ArtifactError> {
    if columns.is_empty() {
        return Err(ArtifactError::EmptySchema);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ArtifactError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}

/// Business threshold, a probability.
pub fn load_threshold(path: &Path) -> std::result::Result<f64, ArtifactError> {
    let threshold: f64 = read_json(path)?;
    validate_threshold(threshold)
}

fn validate_threshold(threshold: f64) -> std::result::Result<f64, ArtifactError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ArtifactError::ThresholdOutOfRange(threshold));
    }
    Ok(threshold)
}

/// Model, schema layout and threshold, immutable for the process lifetime.
pub struct ServingContext {
    schema: Vec<String>,
    layout: FeatureLayout,
    classifier: Box<dyn Classifier>,
    decision: DecisionEngine,
}

impl ServingContext {
    pub fn new(
        schema: Vec<String>,
        classifier: Box<dyn Classifier>,
        threshold: f64,
        separator: &str,
    ) -> std::result::Result<Self, ArtifactError> {
        validate_schema(&schema)?;
        let threshold = validate_threshold(threshold)?;
        let layout = FeatureLayout::from_schema(&schema, separator);
        Ok(Self {
            schema,
            layout,
            classifier,
            decision: DecisionEngine::new(threshold),
        })
    }

    /// Load all three artifacts. Any failure is fatal to startup.
    pub fn load(
        artifacts: &ArtifactsConfig,
        encoding: &EncodingConfig,
    ) -> std::result::Result<Self, ArtifactError> {
        let schema = load_schema(&artifacts.schema_path)?;
        let threshold = load_threshold(&artifacts.threshold_path)?;
        let classifier = load_classifier(&artifacts.model_path, &schema)?;

        let ctx = Self::new(schema, classifier, threshold, &encoding.separator)?;

        let coverage = ctx.layout.coverage();
        info!(
            model = %artifacts.model_path.display(),
            kind = ctx.classifier.kind(),
            columns = ctx.schema.len(),
            numeric = coverage.numeric,
            indicators = coverage.indicators,
            threshold = ctx.decision.threshold(),
            "artifacts loaded"
        );
        if !coverage.unmatched.is_empty() {
            warn!(
                columns = ?coverage.unmatched,
                "schema columns match no request field and will always be 0"
            );
        }

        Ok(ctx)
    }

    /// Derive, encode, score and threshold one customer.
    pub fn predict(&self, record: CustomerRecord) -> Result<PredictionResult> {
        let features = self.layout.transform(record);
        let probability = self.classifier.predict_proba(&features)?;
        Ok(self.decision.decide(probability))
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn threshold(&self) -> f64 {
        self.decision.threshold()
    }
}
