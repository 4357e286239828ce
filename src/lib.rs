//! # Sieve - JSON Cleaning and Aggregation Toolkit
//!
//! A library for turning messy, semi-structured JSON into something that can
//! be analyzed.
//!
//! ## Modules
//!
//! - **clean**: Keep only the fields that are present in every record and
//!   uniformly clean (numeric or coded strings like `"AB12"`)
//! - **aggregate**: Sum numeric leaves of nested documents by path, and
//!   compute summary statistics over lists
//!
//! ## Quick Start
//!
//! ### Cleaning
//!
//! ```rust
//! use sieve::{clean_json, CleanConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = br#"[
//!     {"id": "AB12", "score": 3, "comment": "fine"},
//!     {"id": "CD34", "score": 4.5}
//! ]"#;
//!
//! let cleaned = clean_json(input, &CleanConfig::default())?;
//! assert_eq!(cleaned.fields, vec!["id", "score"]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Aggregation
//!
//! ```rust
//! use sieve::{aggregate, analyze};
//! use serde_json::json;
//!
//! let totals = aggregate(&json!({"a": {"b": 5, "c": [1, 2, 3]}}));
//! assert_eq!(totals.get("a.c"), Some(6.0));
//!
//! let analysis = analyze(&json!([1, 2, 3, 4])).unwrap();
//! // analysis holds sum, mean, average, median, min and max
//! ```

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use aggregate::{aggregate, analyze, column_sums, AggregateMap, Analysis, Operation, PathAggregator, Summary, ToolResponse};
pub use clean::{clean_json, clean_records, find_accepted_fields, project, Cleaned, JsonWriter, Record};
pub use config::{AcceptanceMode, AggregateConfig, CleanConfig, LoaderMode, PresenceMode};
pub use error::{ErrorKind, Result, SieveError};

/// Install the tracing subscriber used by the command line tools
///
/// Reads the `SIEVE_LOG` environment variable, falling back to `sieve=info`.
/// Output goes to stderr so that stdout carries only JSON.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("SIEVE_LOG").unwrap_or_else(|_| EnvFilter::new("sieve=info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init();
}
