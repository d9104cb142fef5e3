//! Pipeline benchmark: customer record → derived fields → schema-aligned vector.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use subscription_api::features::{derive, CustomerRecord, FeatureLayout};

fn customer() -> CustomerRecord {
    CustomerRecord {
        age: 35,
        job: "admin.".to_string(),
        marital: "married".to_string(),
        education: "university.degree".to_string(),
        default: "no".to_string(),
        balance: 1200,
        housing: "yes".to_string(),
        loan: "no".to_string(),
        contact: "cellular".to_string(),
        day_of_week: "mon".to_string(),
        month: "may".to_string(),
        campaign: 1,
        pdays: 999,
        previous: 0,
        poutcome: "unknown".to_string(),
    }
}

/// Roughly the width of the bank-marketing training set after one-hot expansion.
fn wide_schema() -> Vec<String> {
    let mut cols: Vec<String> = [
        "age",
        "balance",
        "campaign",
        "pdays",
        "previous",
        "campaign_intensity",
        "had_previous_contact",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let categories: [(&str, &[&str]); 11] = [
        ("job", &["admin.", "blue-collar", "entrepreneur", "housemaid", "management", "retired", "self-employed", "services", "student", "technician", "unemployed", "unknown"]),
        ("marital", &["divorced", "married", "single", "unknown"]),
        ("education", &["basic.4y", "basic.6y", "basic.9y", "high.school", "illiterate", "professional.course", "university.degree", "unknown"]),
        ("default", &["no", "unknown", "yes"]),
        ("housing", &["no", "unknown", "yes"]),
        ("loan", &["no", "unknown", "yes"]),
        ("contact", &["cellular", "telephone"]),
        ("day_of_week", &["mon", "tue", "wed", "thu", "fri"]),
        ("month", &["mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"]),
        ("poutcome", &["failure", "nonexistent", "success", "unknown"]),
        ("age_group", &["young", "adult", "mid", "senior"]),
    ];
    for (field, values) in categories {
        for value in values {
            cols.push(format!("{}_{}", field, value));
        }
    }
    cols
}

fn bench_derive(c: &mut Criterion) {
    let record = customer();
    c.bench_function("derive_customer", |b| {
        b.iter(|| black_box(derive(black_box(record.clone()))))
    });
}

fn bench_encode_and_align(c: &mut Criterion) {
    let layout = FeatureLayout::from_schema(&wide_schema(), "_");
    let derived = derive(customer());

    c.bench_function("encode_and_align_wide_schema", |b| {
        b.iter(|| black_box(layout.encode_and_align(black_box(&derived))))
    });
}

fn bench_layout_build(c: &mut Criterion) {
    let schema = wide_schema();
    c.bench_function("layout_from_schema", |b| {
        b.iter(|| black_box(FeatureLayout::from_schema(black_box(&schema), "_")))
    });
}

criterion_group!(benches, bench_derive, bench_encode_and_align, bench_layout_build);
criterion_main!(benches);
