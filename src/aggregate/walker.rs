//! Path-keyed numeric aggregation
//!
//! Walks an arbitrary JSON document and sums every numeric leaf into a
//! bucket named by the dotted path of object keys leading to it. Arrays do
//! not contribute a path segment, so all elements of a list share their
//! parent's bucket.
//!
//! The walk uses an explicit stack, so document depth is bounded by memory
//! rather than by the call stack.

use crate::config::AggregateConfig;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Path to accumulated total
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateMap(HashMap<String, f64>);

impl AggregateMap {
    pub fn new() -> Self {
        AggregateMap(HashMap::new())
    }

    /// Add `amount` to the bucket at `path`, creating it at 0.0
    pub fn add(&mut self, path: &str, amount: f64) {
        match self.0.get_mut(path) {
            Some(total) => *total += amount,
            None => {
                self.0.insert(path.to_string(), amount);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.0.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Buckets ordered by path, for stable rendering
    pub fn sorted(&self) -> BTreeMap<String, f64> {
        self.0.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn into_inner(self) -> HashMap<String, f64> {
        self.0
    }
}

/// Parse a string leaf as a number
///
/// Surrounding whitespace is ignored. Non-finite results (`"inf"`, `"NaN"`)
/// are treated as non-numeric.
pub fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric contribution of a leaf, if it has one
///
/// Strings count when [`parse_numeric`] accepts them, so `"inf"` and `"NaN"`
/// contribute nothing even though `f64::from_str` parses them.
pub fn leaf_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Accumulates path totals across one or more documents
#[derive(Debug, Clone)]
pub struct PathAggregator {
    separator: String,
    totals: AggregateMap,
}

impl PathAggregator {
    pub fn new() -> Self {
        Self::with_config(&AggregateConfig::default())
    }

    pub fn with_config(config: &AggregateConfig) -> Self {
        PathAggregator {
            separator: config.separator.clone(),
            totals: AggregateMap::new(),
        }
    }

    /// Continue aggregating from an existing accumulator
    pub fn resume(config: &AggregateConfig, totals: AggregateMap) -> Self {
        PathAggregator {
            separator: config.separator.clone(),
            totals,
        }
    }

    /// Walk `value` and fold its numeric leaves into the totals
    pub fn add(&mut self, value: &Value) {
        let mut stack: Vec<(&Value, String)> = vec![(value, String::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                Value::Object(obj) => {
                    // Reverse so keys are visited in document order
                    for (key, child) in obj.iter().rev() {
                        stack.push((child, self.join(&path, key)));
                    }
                }
                Value::Array(items) => {
                    for child in items.iter().rev() {
                        stack.push((child, path.clone()));
                    }
                }
                leaf => {
                    if let Some(amount) = leaf_number(leaf) {
                        self.totals.add(&path, amount);
                    }
                }
            }
        }
    }

    pub fn totals(&self) -> &AggregateMap {
        &self.totals
    }

    pub fn finish(self) -> AggregateMap {
        self.totals
    }

    fn join(&self, parent: &str, key: &str) -> String {
        if parent.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", parent, self.separator, key)
        }
    }
}

impl Default for PathAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot aggregation of a single document
pub fn aggregate(value: &Value) -> AggregateMap {
    let mut aggregator = PathAggregator::new();
    aggregator.add(value);
    aggregator.finish()
}

/// Aggregate `value` into an existing accumulator
pub fn aggregate_into(value: &Value, accumulator: AggregateMap) -> AggregateMap {
    let mut aggregator = PathAggregator::resume(&AggregateConfig::default(), accumulator);
    aggregator.add(value);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_paths() {
        let result = aggregate(&json!({"a": {"b": 5, "c": [1, 2, 3]}}));
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("a.b"), Some(5.0));
        assert_eq!(result.get("a.c"), Some(6.0));
    }

    #[test]
    fn test_numeric_strings_and_noise() {
        let result = aggregate(&json!({"x": "3.5", "y": "abc"}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("x"), Some(3.5));
        assert_eq!(result.get("y"), None);
    }

    #[test]
    fn test_booleans_and_nulls_skipped() {
        let result = aggregate(&json!({"flag": true, "none": null, "n": 1}));
        assert_eq!(result.sorted().into_iter().collect::<Vec<_>>(), vec![("n".to_string(), 1.0)]);
    }

    #[test]
    fn test_list_of_records_sums_columns() {
        let data = json!([
            {"price": 10, "qty": "2", "meta": {"weight": 1.5}},
            {"price": 5.5, "qty": 3, "meta": {"weight": "0.5"}},
            {"price": "n/a", "name": "widget"}
        ]);
        let result = aggregate(&data);
        assert_eq!(result.get("price"), Some(15.5));
        assert_eq!(result.get("qty"), Some(5.0));
        assert_eq!(result.get("meta.weight"), Some(2.0));
        assert_eq!(result.get("name"), None);
    }

    #[test]
    fn test_sibling_order_does_not_matter() {
        let forward = aggregate(&json!({"v": [1, 2, 4, 8]}));
        let backward = aggregate(&json!({"v": [8, 4, 2, 1]}));
        assert_eq!(forward.get("v"), Some(15.0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_dotted_key_collides_with_nested_path() {
        let result = aggregate(&json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("a.b"), Some(3.0));
    }

    #[test]
    fn test_root_scalar_uses_empty_path() {
        let result = aggregate(&json!([1, "2", "x"]));
        assert_eq!(result.get(""), Some(3.0));
    }

    #[test]
    fn test_incremental_accumulation() {
        let first = aggregate(&json!({"a": 1}));
        let both = aggregate_into(&json!({"a": 2, "b": 1}), first);
        assert_eq!(both.get("a"), Some(3.0));
        assert_eq!(both.get("b"), Some(1.0));
    }

    #[test]
    fn test_custom_separator() {
        let config = AggregateConfig {
            separator: "/".to_string(),
            ..AggregateConfig::default()
        };
        let mut aggregator = PathAggregator::with_config(&config);
        aggregator.add(&json!({"a": {"b": {"c": 1}}}));
        assert_eq!(aggregator.totals().get("a/b/c"), Some(1.0));
    }

    #[test]
    fn test_deep_document_does_not_overflow() {
        let mut value = json!(1);
        for _ in 0..5_000 {
            value = Value::Array(vec![value]);
        }
        let result = aggregate(&value);
        assert_eq!(result.get(""), Some(1.0));
        // Nested Value drop is recursive; leak instead of dropping 5k levels
        std::mem::forget(value);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 42 "), Some(42.0));
        assert_eq!(parse_numeric("-1.25"), Some(-1.25));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("12abc"), None);
    }

    #[test]
    fn test_non_finite_strings_are_not_leaves() {
        assert_eq!(leaf_number(&json!("inf")), None);
        assert_eq!(leaf_number(&json!("-Infinity")), None);
        assert_eq!(leaf_number(&json!("NaN")), None);
        assert_eq!(leaf_number(&json!(" 7 ")), Some(7.0));

        let result = aggregate(&json!({"x": "inf", "y": "NaN", "z": 1}));
        assert_eq!(result.get("x"), None);
        assert_eq!(result.get("y"), None);
        assert_eq!(result.get("z"), Some(1.0));
    }
}
