use crate::error::{Error, Result};
use crate::record::ConstantRecord;

/// Sorts records into ascending value order and drops duplicate values.
///
/// The sort is stable, so among records sharing a value the first one
/// declared comes first and is the one kept. Duplicates have to go because
/// identical values would make the generated switch or map ill-formed.
pub fn normalize(type_name: &str, mut records: Vec<ConstantRecord>) -> Result<Vec<ConstantRecord>> {
    if records.is_empty() {
        return Err(Error::EmptyInput {
            type_name: type_name.to_owned(),
        });
    }

    // Ordering and range tests read the flag per record, so it must agree
    let signed = records[0].signed;
    if let Some(odd) = records.iter().find(|r| r.signed != signed) {
        return Err(Error::MixedSignedness {
            type_name: type_name.to_owned(),
            name: odd.name.clone(),
        });
    }

    records.sort_by(|a, b| a.cmp_value(b));

    // `dedup_by` hands us (later, earlier) and removes the later one
    records.dedup_by(|later, earlier| {
        let duplicate = later.value == earlier.value;
        if duplicate {
            tracing::debug!(
                type_name,
                kept = %earlier.name,
                dropped = %later.name,
                value = later.value,
                "Dropping constant with duplicate value"
            );
        }
        duplicate
    });

    Ok(records)
}
