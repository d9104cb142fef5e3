//! Encoding pipeline: derived record → one-hot indicators → vector in schema order.
//!
//! The `(field, value) → column` table is built once from the training schema, so a
//! category never seen in training simply has no column and contributes nothing.

use super::{derive, CategoricalField, CustomerRecord, DerivedRecord, FeatureVector, NumericFeature};
use std::collections::HashMap;

/// How much of the schema the layout understands; logged at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutCoverage {
    pub numeric: usize,
    pub indicators: usize,
    /// Schema columns matching no known field; always encoded as 0
    pub unmatched: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FeatureLayout {
    width: usize,
    numeric: Vec<(NumericFeature, usize)>,
    indicators: HashMap<CategoricalField, HashMap<String, usize>>,
    coverage: LayoutCoverage,
}

impl FeatureLayout {
    /// Resolve every schema column to a numeric feature or a `(field, value)` indicator.
    pub fn from_schema(columns: &[String], separator: &str) -> Self {
        let mut numeric = Vec::new();
        let mut indicators: HashMap<CategoricalField, HashMap<String, usize>> = HashMap::new();
        let mut coverage = LayoutCoverage::default();

        for (idx, column) in columns.iter().enumerate() {
            if let Some(feature) = NumericFeature::ALL
                .iter()
                .find(|f| f.column() == column.as_str())
            {
                numeric.push((*feature, idx));
                coverage.numeric += 1;
                continue;
            }

            match split_indicator(column, separator) {
                Some((field, value)) => {
                    indicators
                        .entry(field)
                        .or_default()
                        .insert(value.to_string(), idx);
                    coverage.indicators += 1;
                }
                None => coverage.unmatched.push(column.clone()),
            }
        }

        Self {
            width: columns.len(),
            numeric,
            indicators,
            coverage,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn coverage(&self) -> &LayoutCoverage {
        &self.coverage
    }

    /// Schema index of the indicator for `field = value`, if training saw it.
    pub fn indicator(&self, field: CategoricalField, value: &str) -> Option<usize> {
        self.indicators.get(&field)?.get(value).copied()
    }

    /// One-hot expand and align to the schema. Output length always equals the schema width.
    pub fn encode_and_align(&self, record: &DerivedRecord) -> FeatureVector {
        let mut values = vec![0.0f32; self.width];

        for (feature, idx) in &self.numeric {
            values[*idx] = record.numeric(*feature) as f32;
        }

        for field in CategoricalField::ALL {
            let Some(value) = record.category(field) else {
                continue;
            };
            if let Some(idx) = self.indicator(field, value) {
                values[idx] = 1.0;
            }
        }

        FeatureVector { values }
    }

    /// Derive then encode.
    pub fn transform(&self, record: CustomerRecord) -> FeatureVector {
        self.encode_and_align(&derive(record))
    }
}

/// Split `job_admin.` into `(Job, "admin.")`. The longest matching field name wins,
/// so a value containing the separator never shadows another field.
fn split_indicator<'a>(column: &'a str, separator: &str) -> Option<(CategoricalField, &'a str)> {
    CategoricalField::ALL
        .iter()
        .filter_map(|field| {
            let value = column
                .strip_prefix(field.name())?
                .strip_prefix(separator)?;
            Some((*field, value))
        })
        .max_by_key(|(field, _)| field.name().len())
}
