//! Schema-consistent cleaning of record collections
//!
//! A record collection is analyzed for fields that are present everywhere
//! and uniformly clean, then every record is projected onto that field set.
//!
//! ```rust
//! use sieve::clean::{clean_records, records_from_value};
//! use sieve::config::{CleanConfig, LoaderMode};
//! use serde_json::json;
//!
//! # fn main() -> sieve::Result<()> {
//! let records = records_from_value(
//!     json!([{"id": "AB12", "v": 3}, {"id": "CD34", "v": "bad"}]),
//!     LoaderMode::DropNonObjects,
//! )?;
//! let cleaned = clean_records(&records, &CleanConfig::default())?;
//! assert_eq!(cleaned.fields, vec!["id"]);
//! # Ok(())
//! # }
//! ```

pub mod analyze;
pub mod classify;
pub mod loader;
pub mod project;
pub mod writer;

pub use analyze::{common_fields, find_accepted_fields, ConsistencyAnalyzer};
pub use classify::{classify, Policy};
pub use loader::{extract_payload, load_ndjson, load_records, parse_json, records_from_value, Record};
pub use project::project;
pub use writer::JsonWriter;

use crate::config::CleanConfig;
use crate::error::Result;
use serde::Serialize;

/// Accepted fields together with the projected records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cleaned {
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}

/// Analyze and project an already loaded collection
pub fn clean_records(records: &[Record], config: &CleanConfig) -> Result<Cleaned> {
    let fields = find_accepted_fields(records, config);
    let records = project(records, &fields)?;
    Ok(Cleaned { fields, records })
}

/// Load, analyze and project raw JSON bytes
pub fn clean_json(bytes: &[u8], config: &CleanConfig) -> Result<Cleaned> {
    let value = parse_json(bytes, config.max_depth)?;
    let records = records_from_value(value, config.loader)?;
    clean_records(&records, config)
}
