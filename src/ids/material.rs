//! ATL identifiers for material batches.
//!
//! One sequence number is allocated per distinct material type, starting
//! right after the `last_number` reported by the remote counter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{test_id_for_period, IdError, IdFormat, Period};

/// A test record as submitted for registration.
///
/// Only `materialType` is interpreted; every other field is carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Material under test; tests sharing it share an ATL ID.
    pub material_type: String,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestRecord {
    /// Creates a record with no extra fields.
    pub fn new(material_type: impl Into<String>) -> Self {
        Self { material_type: material_type.into(), fields: Map::new() }
    }
}

/// A test record stamped with its batch identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTest {
    /// The original record.
    #[serde(flatten)]
    pub record: TestRecord,
    /// ATL ID shared by every test of the same material.
    pub atl_id: String,
    /// Normalised material name.
    pub material: String,
}

/// Result of stamping a batch of tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBatch {
    /// Test ID shared by the whole submission.
    pub test_id: String,
    /// Input records in input order, each with its ATL ID.
    pub formatted_tests: Vec<FormattedTest>,
    /// Distinct ATL IDs in allocation order.
    pub material_ids: Vec<String>,
}

/// Generates `material_count` consecutive ATL IDs after `last_number`.
///
/// The result is `PREFIX/YY/MM/<last_number + i>` for `i` in
/// `1..=material_count`. `last_number` is advisory: two callers holding the
/// same value produce the same IDs.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] when `material_count` is zero or the
/// sequence would overflow.
pub fn generate_material_ids(
    format: &IdFormat,
    material_count: usize,
    last_number: u64,
    period: Period,
) -> Result<Vec<String>, IdError> {
    if material_count == 0 {
        return Err(IdError::invalid("material count must be positive"));
    }
    (1..=material_count)
        .map(|offset| atl_id(format, last_number, offset, period))
        .collect()
}

/// Groups tests by material type and stamps each group with one ATL ID.
///
/// Groups are numbered in first-occurrence order. The material type is
/// trimmed before grouping, so `" Steel"` and `"Steel"` share an ID.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] for a blank material type or when a
/// sequence number would overflow.
pub fn format_tests_with_ids(
    format: &IdFormat,
    tests: Vec<TestRecord>,
    existing_test_count: u64,
    last_number: u64,
    period: Period,
) -> Result<FormattedBatch, IdError> {
    let test_id = test_id_for_period(format, existing_test_count, period)?;

    let mut assigned: HashMap<String, String> = HashMap::new();
    let mut material_ids = Vec::new();
    let mut formatted_tests = Vec::with_capacity(tests.len());

    for (index, mut record) in tests.into_iter().enumerate() {
        let material = record.material_type.trim().to_string();
        if material.is_empty() {
            return Err(IdError::invalid(format!("test #{index} has no material type")));
        }

        let atl_id = match assigned.get(&material) {
            Some(id) => id.clone(),
            None => {
                let id = atl_id(format, last_number, material_ids.len() + 1, period)?;
                assigned.insert(material.clone(), id.clone());
                material_ids.push(id.clone());
                id
            }
        };

        record.fields.remove("atlId");
        record.fields.remove("material");
        formatted_tests.push(FormattedTest { record, atl_id, material });
    }

    Ok(FormattedBatch { test_id, formatted_tests, material_ids })
}

fn atl_id(
    format: &IdFormat,
    last_number: u64,
    offset: usize,
    period: Period,
) -> Result<String, IdError> {
    let sequence = u64::try_from(offset)
        .ok()
        .and_then(|offset| last_number.checked_add(offset))
        .ok_or_else(|| IdError::invalid("ATL sequence overflows"))?;
    Ok(format!("{}/{}/{}/{sequence}", format.prefix, period.yy(), period.mm()))
}
