//! Field consistency analysis
//!
//! Works out which fields of a record collection are safe to keep: present
//! in every record and clean under the configured acceptance rule.

use crate::clean::classify::{is_clean, is_coded_string, is_flat, is_numeric};
use crate::clean::loader::Record;
use crate::config::{AcceptanceMode, CleanConfig, PresenceMode};
use serde_json::Value;
use tracing::{debug, info};

/// Computes the accepted field set of a record collection
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyAnalyzer {
    presence: PresenceMode,
    acceptance: AcceptanceMode,
}

impl ConsistencyAnalyzer {
    pub fn new(presence: PresenceMode, acceptance: AcceptanceMode) -> Self {
        ConsistencyAnalyzer { presence, acceptance }
    }

    pub fn from_config(config: &CleanConfig) -> Self {
        Self::new(config.presence, config.acceptance)
    }

    /// Accepted field names, in first-seen order
    pub fn accepted_fields(&self, records: &[Record]) -> Vec<String> {
        if records.is_empty() {
            return Vec::new();
        }

        let mut accepted = Vec::new();

        for field in common_fields(records) {
            let values: Vec<&Value> = records.iter().filter_map(|record| record.get(&field)).collect();

            if self.judge(&values) {
                accepted.push(field);
            } else {
                debug!(field = %field, "rejecting field");
            }
        }

        info!(
            records = records.len(),
            accepted = accepted.len(),
            fields = ?accepted,
            "field analysis complete"
        );
        accepted
    }

    /// Apply the acceptance rule, honouring the presence mode's view of nulls
    fn judge(&self, values: &[&Value]) -> bool {
        match self.presence {
            PresenceMode::Strict => accepts(self.acceptance, values),
            PresenceMode::Lenient => {
                let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_null()).collect();
                if present.is_empty() {
                    // An all-null field only survives a rule that tolerates nulls itself
                    return self.acceptance == AcceptanceMode::FlatNullTolerant;
                }
                accepts(self.acceptance, &present)
            }
        }
    }
}

/// Keys of the first record that every other record also has, in the
/// first record's order
pub fn common_fields(records: &[Record]) -> Vec<String> {
    let Some((first, rest)) = records.split_first() else {
        return Vec::new();
    };
    first
        .keys()
        .filter(|key| rest.iter().all(|record| record.contains_key(*key)))
        .cloned()
        .collect()
}

/// Apply an acceptance rule to every value a field takes
pub fn accepts(mode: AcceptanceMode, values: &[&Value]) -> bool {
    match mode {
        AcceptanceMode::FieldLevelOr => {
            values.iter().all(|v| is_numeric(v)) || values.iter().all(|v| is_coded_string(v))
        }
        AcceptanceMode::ValueLevelOr => values.iter().all(|v| is_clean(v)),
        AcceptanceMode::FlatNonNull => values.iter().all(|v| !v.is_null() && is_flat(v)),
        AcceptanceMode::FlatNullTolerant => values.iter().filter(|v| !v.is_null()).all(|v| is_flat(v)),
    }
}

/// Accepted field names of `records` under `config`
pub fn find_accepted_fields(records: &[Record], config: &CleanConfig) -> Vec<String> {
    ConsistencyAnalyzer::from_config(config).accepted_fields(records)
}
