//! Field-level validation of a prediction request body.

use super::CustomerRecord;
use crate::error::{AppError, FieldError, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
}

impl FieldKind {
    /// Normalized value, or None if it does not conform. Integers also accept a
    /// numeric string (`"35"`) and a whole float (`35.0`).
    fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            FieldKind::Integer => coerce_integer(value).map(Value::from),
            FieldKind::Text => value.is_string().then(|| value.clone()),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Integer => "value is not a valid integer",
            FieldKind::Text => "value is not a valid string",
        }
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_float)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn whole_float(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then(|| f as i64)
}

/// Every required field of a customer record, in wire order.
pub const RECORD_FIELDS: [(&str, FieldKind); 15] = [
    ("age", FieldKind::Integer),
    ("job", FieldKind::Text),
    ("marital", FieldKind::Text),
    ("education", FieldKind::Text),
    ("default", FieldKind::Text),
    ("balance", FieldKind::Integer),
    ("housing", FieldKind::Text),
    ("loan", FieldKind::Text),
    ("contact", FieldKind::Text),
    ("day_of_week", FieldKind::Text),
    ("month", FieldKind::Text),
    ("campaign", FieldKind::Integer),
    ("pdays", FieldKind::Integer),
    ("previous", FieldKind::Integer),
    ("poutcome", FieldKind::Text),
];

impl CustomerRecord {
    /// Check presence and type of every field, reporting all offenders at once.
    /// Unknown extra fields are ignored.
    pub fn from_json(body: Value) -> Result<Self> {
        let Some(object) = body.as_object() else {
            return Err(AppError::Validation(vec![FieldError::new(
                "body",
                "expected a JSON object",
            )]));
        };

        let mut fields = Map::with_capacity(RECORD_FIELDS.len());
        let mut errors = Vec::new();
        for (name, kind) in RECORD_FIELDS {
            match object.get(name) {
                None => errors.push(FieldError::new(name, "field required")),
                Some(v) => match kind.coerce(v) {
                    Some(v) => {
                        fields.insert(name.to_string(), v);
                    }
                    None => errors.push(FieldError::new(name, kind.expected())),
                },
            }
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::Validation(vec![FieldError::new("body", e.to_string())]))
    }
}
