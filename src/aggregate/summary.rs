//! Summary statistics over flat numeric sequences
//!
//! Input lists may contain anything; numbers and numeric-looking strings
//! are kept and everything else is ignored.

use crate::aggregate::walker::leaf_number;
use crate::clean::loader::type_name;
use crate::error::{Result, SieveError};
use clap::ValueEnum;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A statistic that can be requested from a [`Summary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sum,
    Mean,
    Average,
    Median,
    Min,
    Max,
    Count,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Mean => "mean",
            Operation::Average => "average",
            Operation::Median => "median",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Count => "count",
        }
    }
}

/// Statistics of one numeric sequence
///
/// `average` always equals `mean`; both are reported for clients that ask
/// for either name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize plain numbers. Fails if `numbers` is empty.
    pub fn from_numbers(numbers: &[f64]) -> Result<Self> {
        if numbers.is_empty() {
            return Err(SieveError::empty("No valid numeric data in the list"));
        }

        let mut sorted = numbers.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let mean = sum / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Ok(Summary {
            count,
            sum,
            mean,
            average: mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    pub fn get(&self, op: Operation) -> f64 {
        match op {
            Operation::Sum => self.sum,
            Operation::Mean => self.mean,
            Operation::Average => self.average,
            Operation::Median => self.median,
            Operation::Min => self.min,
            Operation::Max => self.max,
            Operation::Count => self.count as f64,
        }
    }

    /// Only the requested statistics, keyed by name
    pub fn select(&self, ops: &[Operation]) -> Map<String, Value> {
        let mut selected = Map::new();
        for &op in ops {
            let value = match op {
                Operation::Count => Value::from(self.count),
                other => Value::from(self.get(other)),
            };
            selected.insert(op.as_str().to_string(), value);
        }
        selected
    }
}

/// Numbers and numeric strings of `values`, in order
pub fn numeric_values(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(leaf_number).collect()
}

/// Summarize a heterogeneous list
pub fn summarize(values: &[Value]) -> Result<Summary> {
    let numbers = numeric_values(values);
    debug!(total = values.len(), numeric = numbers.len(), "summarizing list");
    Summary::from_numbers(&numbers)
}

/// Per-group summaries, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSummary(Vec<(String, Summary)>);

impl GroupedSummary {
    pub fn get(&self, name: &str) -> Option<&Summary> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Summary)> {
        self.0.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn select(&self, ops: &[Operation]) -> Map<String, Value> {
        self.iter()
            .map(|(name, summary)| (name.to_string(), Value::Object(summary.select(ops))))
            .collect()
    }
}

impl Serialize for GroupedSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Summarize every list-valued group of `groups`
///
/// Groups that are not lists, or that hold no numeric values, are left out.
/// It is an error for every group to be left out.
pub fn summarize_groups(groups: &Map<String, Value>) -> Result<GroupedSummary> {
    let mut summaries = Vec::new();

    for (name, values) in groups {
        let Value::Array(values) = values else {
            debug!(group = %name, kind = type_name(values), "skipping non-list group");
            continue;
        };
        match summarize(values) {
            Ok(summary) => summaries.push((name.clone(), summary)),
            Err(SieveError::EmptyInput(_)) => {
                warn!(group = %name, "group has no numeric values");
            }
            Err(e) => return Err(e),
        }
    }

    if summaries.is_empty() {
        return Err(SieveError::empty("No valid numeric data found"));
    }
    Ok(GroupedSummary(summaries))
}

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Single(Summary),
    Grouped(GroupedSummary),
}

impl Analysis {
    pub fn select(&self, ops: &[Operation]) -> Value {
        match self {
            Analysis::Single(summary) => Value::Object(summary.select(ops)),
            Analysis::Grouped(groups) => Value::Object(groups.select(ops)),
        }
    }
}

/// Summarize a list, or a mapping of named lists
pub fn analyze(data: &Value) -> Result<Analysis> {
    match data {
        Value::Array(values) => summarize(values).map(Analysis::Single),
        Value::Object(groups) => summarize_groups(groups).map(Analysis::Grouped),
        other => Err(SieveError::malformed(format!(
            "unsupported data type: {}",
            type_name(other)
        ))),
    }
}
