use crate::clean::loader::Record;
use crate::error::{Result, SieveError};

/// Rewrite each record to hold exactly `fields`, in that order
///
/// Every field must be present in every record; a missing one means the
/// field set was computed for different data and is reported as a
/// consistency fault.
pub fn project(records: &[Record], fields: &[String]) -> Result<Vec<Record>> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| project_record(idx, record, fields))
        .collect()
}

fn project_record(idx: usize, record: &Record, fields: &[String]) -> Result<Record> {
    let mut projected = Record::new();

    for field in fields {
        let value = record.get(field).ok_or_else(|| SieveError::ConfigurationConsistency {
            field: field.clone(),
            record: idx,
        })?;
        projected.insert(field.clone(), value.clone());
    }

    Ok(projected)
}
