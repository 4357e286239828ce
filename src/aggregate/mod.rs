//! Numeric aggregation over nested JSON
//!
//! Two independent tools live here: path-keyed column sums over any
//! document, and summary statistics over flat lists (or named groups of
//! lists). Both tolerate numeric-looking strings and skip other noise.

pub mod response;
pub mod summary;
pub mod walker;

pub use response::ToolResponse;
pub use summary::{analyze, summarize, summarize_groups, Analysis, GroupedSummary, Operation, Summary};
pub use walker::{aggregate, aggregate_into, AggregateMap, PathAggregator};

use crate::clean::loader::{check_depth, type_name};
use crate::config::AggregateConfig;
use crate::error::{Result, SieveError};
use serde_json::Value;
use tracing::info;

/// Sum every numeric leaf of `data` by path
///
/// The top level must be an array or object, and at least one numeric
/// leaf must exist.
pub fn column_sums(data: &Value, config: &AggregateConfig) -> Result<AggregateMap> {
    if !matches!(data, Value::Array(_) | Value::Object(_)) {
        return Err(SieveError::malformed(format!(
            "expected an array or object, found {}",
            type_name(data)
        )));
    }
    check_depth(data, config.max_depth)?;

    let mut aggregator = PathAggregator::with_config(config);
    aggregator.add(data);
    let totals = aggregator.finish();

    if totals.is_empty() {
        return Err(SieveError::empty("No numeric fields found."));
    }
    info!(paths = totals.len(), "aggregated column sums");
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_column_sums() {
        let data = json!([{"a": 1, "b": {"c": "2"}}, {"a": 3, "b": {"c": 4}}]);
        let totals = column_sums(&data, &AggregateConfig::default()).unwrap();
        assert_eq!(totals.get("a"), Some(4.0));
        assert_eq!(totals.get("b.c"), Some(6.0));
    }

    #[test]
    fn test_column_sums_errors() {
        let config = AggregateConfig::default();
        assert_eq!(column_sums(&json!(5), &config).unwrap_err().kind(), ErrorKind::MalformedInput);
        assert_eq!(
            column_sums(&json!({"name": "x", "ok": true}), &config).unwrap_err().kind(),
            ErrorKind::EmptyInput
        );
    }

    #[test]
    fn test_column_sums_depth_limit() {
        let config = AggregateConfig {
            max_depth: 2,
            ..AggregateConfig::default()
        };
        let err = column_sums(&json!({"a": {"b": {"c": 1}}}), &config).unwrap_err();
        assert!(matches!(err, SieveError::NestingTooDeep { limit: 2 }));
    }
}
