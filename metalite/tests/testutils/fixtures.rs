//! Record fixtures for MetaLite integration tests
//!
//! Uses ONLY the public metalite API.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use metalite::{
    CatalogRecord, FixedClock, FreshnessDataPoint, Lineage, LineageNode, Owner, SchemaColumn,
    UsageDataPoint,
};
use std::io::Write;
use uuid::Uuid;

pub const TAGS: [&str; 6] = ["PII", "Finance", "Marketing", "Sales", "Product", "GDPR"];

const NOUNS: [&str; 8] = [
    "orders", "customer", "invoice", "session", "campaign", "ledger", "shipment", "account",
];
const VERBS: [&str; 6] = ["load", "sync", "merge", "export", "ingest", "rollup"];
const COLUMN_TYPES: [&str; 6] = ["varchar", "int", "bigint", "timestamp", "boolean", "decimal"];

/// Midnight UTC on the given day
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// The "current time" used by the documented scenarios
pub fn scenario_now() -> DateTime<Utc> {
    at(2024, 6, 15)
}

pub fn scenario_clock() -> FixedClock {
    FixedClock::new(scenario_now())
}

/// Minimal record with the fields the query engine looks at
pub fn record(id: &str, name: &str, tags: &[&str], last_updated: DateTime<Utc>) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Fixture dataset {}", name),
        owner: Owner {
            id: format!("owner-{}", id),
            name: "Fixture Owner".to_string(),
            email: "owner@example.com".to_string(),
        },
        last_updated,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        schema: vec![SchemaColumn {
            name: "id".to_string(),
            data_type: "bigint".to_string(),
            description: None,
        }],
        lineage: Lineage::default(),
        usage: vec![],
        freshness: vec![],
    }
}

/// The two-record collection used by scenarios A through D
pub fn scenario_records() -> Vec<CatalogRecord> {
    vec![
        record("sales-1", "dwh.sales_1", &["Sales"], at(2024, 1, 1)),
        record("mktg-2", "dwh.mktg_2", &["Marketing"], at(2024, 6, 1)),
    ]
}

/// Deterministic synthetic catalog
///
/// Same seed and `now` always give the same records. Histories are
/// chronological and identifiers unique.
pub fn sample_catalog(seed: u64, count: usize, now: DateTime<Utc>) -> Vec<CatalogRecord> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count).map(|i| sample_record(&mut rng, i, now)).collect()
}

fn sample_record(rng: &mut fastrand::Rng, index: usize, now: DateTime<Utc>) -> CatalogRecord {
    let last_updated = now - Duration::minutes(rng.i64(0..90 * 24 * 60));

    let mut tags: Vec<String> = Vec::new();
    let tag_count = rng.usize(1..=3);
    while tags.len() < tag_count {
        let tag = TAGS[rng.usize(..TAGS.len())];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    let schema = (0..rng.usize(5..=20))
        .map(|c| SchemaColumn {
            name: format!("col_{}", c),
            data_type: COLUMN_TYPES[rng.usize(..COLUMN_TYPES.len())].to_string(),
            description: Some(format!("Column {}", c)),
        })
        .collect();

    let today = now.date_naive();
    let usage = (0..30)
        .map(|j| UsageDataPoint {
            date: today - Duration::days(30 - j),
            queries: rng.u64(5..=200),
        })
        .collect();

    let freshness = (0..7)
        .rev()
        .map(|j| {
            let week = today - Duration::days(j * 7);
            FreshnessDataPoint {
                date: week_start(week),
                last_updated: now
                    - Duration::days(j * 7)
                    - Duration::minutes(rng.i64(0..3 * 24 * 60)),
            }
        })
        .collect();

    let noun = NOUNS[rng.usize(..NOUNS.len())];
    let verb = VERBS[rng.usize(..VERBS.len())];

    CatalogRecord {
        id: Uuid::from_u128(rng.u128(..)).to_string(),
        name: format!("dwh.{}_{}_{}", noun, verb, index),
        description: format!("Synthetic {} dataset", noun),
        owner: Owner {
            id: Uuid::from_u128(rng.u128(..)).to_string(),
            name: format!("Owner {}", rng.u32(..1000)),
            email: format!("owner{}@example.com", index),
        },
        last_updated,
        tags,
        schema,
        lineage: Lineage {
            upstream: vec![LineageNode {
                id: Uuid::from_u128(rng.u128(..)).to_string(),
                name: format!("source_{}", noun),
            }],
            downstream: vec![LineageNode {
                id: Uuid::from_u128(rng.u128(..)).to_string(),
                name: format!("mart_{}", verb),
            }],
        },
        usage,
        freshness,
    }
}

/// Sunday on or before `day`
fn week_start(day: NaiveDate) -> NaiveDate {
    use chrono::Datelike;
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

/// Write `records` as a JSON array to a temp file
pub fn write_records_file(records: &[CatalogRecord]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string_pretty(records).expect("Failed to serialize records");
    file.write_all(json.as_bytes())
        .expect("Failed to write records file");
    file
}
