//! Engineered fields computed from a raw record.

use super::{AgeGroup, CustomerRecord, DerivedRecord};

/// Adds `campaign_intensity`, `had_previous_contact` and `age_group`.
pub fn derive(record: CustomerRecord) -> DerivedRecord {
    // a negative `previous` must not zero the divisor
    let divisor = record.previous.saturating_add(1).max(1) as f64;
    let campaign_intensity = record.campaign as f64 / divisor;
    let had_previous_contact = u8::from(record.previous > 0);
    let age_group = AgeGroup::from_age(record.age);

    DerivedRecord {
        record,
        campaign_intensity,
        had_previous_contact,
        age_group,
    }
}
