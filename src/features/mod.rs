//! Customer record types and the transform from a raw record to a model-ready vector.

mod derived;
mod pipeline;
mod validate;

pub use derived::derive;
pub use pipeline::{FeatureLayout, LayoutCoverage};
pub use validate::{FieldKind, RECORD_FIELDS};

use serde::{Deserialize, Serialize};

/// One customer row as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub age: i64,
    pub job: String,
    pub marital: String,
    pub education: String,
    pub default: String,
    pub balance: i64,
    pub housing: String,
    pub loan: String,
    pub contact: String,
    pub day_of_week: String,
    pub month: String,
    pub campaign: i64,
    pub pdays: i64,
    pub previous: i64,
    pub poutcome: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    Mid,
    Senior,
}

impl AgeGroup {
    /// Bins (18, 30], (30, 45], (45, 60], (60, 100], with 18 itself counted as young.
    pub fn from_age(age: i64) -> Option<Self> {
        match age {
            18..=30 => Some(AgeGroup::Young),
            31..=45 => Some(AgeGroup::Adult),
            46..=60 => Some(AgeGroup::Mid),
            61..=100 => Some(AgeGroup::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::Mid => "mid",
            AgeGroup::Senior => "senior",
        }
    }
}

/// Record plus the engineered fields the model was trained with.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: CustomerRecord,
    pub campaign_intensity: f64,
    pub had_previous_contact: u8,
    pub age_group: Option<AgeGroup>,
}

/// Fields that pass through to the model as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFeature {
    Age,
    Balance,
    Campaign,
    Pdays,
    Previous,
    CampaignIntensity,
    HadPreviousContact,
}

impl NumericFeature {
    pub const ALL: [NumericFeature; 7] = [
        NumericFeature::Age,
        NumericFeature::Balance,
        NumericFeature::Campaign,
        NumericFeature::Pdays,
        NumericFeature::Previous,
        NumericFeature::CampaignIntensity,
        NumericFeature::HadPreviousContact,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            NumericFeature::Age => "age",
            NumericFeature::Balance => "balance",
            NumericFeature::Campaign => "campaign",
            NumericFeature::Pdays => "pdays",
            NumericFeature::Previous => "previous",
            NumericFeature::CampaignIntensity => "campaign_intensity",
            NumericFeature::HadPreviousContact => "had_previous_contact",
        }
    }
}

/// Fields that are one-hot expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Job,
    Marital,
    Education,
    Default,
    Housing,
    Loan,
    Contact,
    DayOfWeek,
    Month,
    Poutcome,
    AgeGroup,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 11] = [
        CategoricalField::Job,
        CategoricalField::Marital,
        CategoricalField::Education,
        CategoricalField::Default,
        CategoricalField::Housing,
        CategoricalField::Loan,
        CategoricalField::Contact,
        CategoricalField::DayOfWeek,
        CategoricalField::Month,
        CategoricalField::Poutcome,
        CategoricalField::AgeGroup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::Job => "job",
            CategoricalField::Marital => "marital",
            CategoricalField::Education => "education",
            CategoricalField::Default => "default",
            CategoricalField::Housing => "housing",
            CategoricalField::Loan => "loan",
            CategoricalField::Contact => "contact",
            CategoricalField::DayOfWeek => "day_of_week",
            CategoricalField::Month => "month",
            CategoricalField::Poutcome => "poutcome",
            CategoricalField::AgeGroup => "age_group",
        }
    }
}

impl DerivedRecord {
    pub fn numeric(&self, feature: NumericFeature) -> f64 {
        let r = &self.record;
        match feature {
            NumericFeature::Age => r.age as f64,
            NumericFeature::Balance => r.balance as f64,
            NumericFeature::Campaign => r.campaign as f64,
            NumericFeature::Pdays => r.pdays as f64,
            NumericFeature::Previous => r.previous as f64,
            NumericFeature::CampaignIntensity => self.campaign_intensity,
            NumericFeature::HadPreviousContact => self.had_previous_contact as f64,
        }
    }

    /// Category value for a field; `None` only for an unbucketed age.
    pub fn category(&self, field: CategoricalField) -> Option<&str> {
        let r = &self.record;
        let value = match field {
            CategoricalField::Job => r.job.as_str(),
            CategoricalField::Marital => r.marital.as_str(),
            CategoricalField::Education => r.education.as_str(),
            CategoricalField::Default => r.default.as_str(),
            CategoricalField::Housing => r.housing.as_str(),
            CategoricalField::Loan => r.loan.as_str(),
            CategoricalField::Contact => r.contact.as_str(),
            CategoricalField::DayOfWeek => r.day_of_week.as_str(),
            CategoricalField::Month => r.month.as_str(),
            CategoricalField::Poutcome => r.poutcome.as_str(),
            CategoricalField::AgeGroup => return self.age_group.map(|g| g.as_str()),
        };
        Some(value)
    }
}

/// Model input aligned to the training schema, one slot per schema column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f32>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
