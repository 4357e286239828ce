//! sieve-columns: Sum every numeric leaf of a JSON document by path
//!
//! Usage:
//!   # {"a": {"b": 5, "c": [1, 2, 3]}}  ->  {"a.b": 5.0, "a.c": 6.0}
//!   sieve-columns data.json
//!
//!   # Request-style envelope: sums the value under "data"
//!   sieve-columns --payload request.json
//!
//!   # Accumulate across every line of an NDJSON stream
//!   sieve-columns --ndjson events.jsonl

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use sieve::clean::{extract_payload, parse_json};
use sieve::{column_sums, AggregateConfig, AggregateMap, JsonWriter, PathAggregator, SieveError, ToolResponse};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "sieve-columns")]
#[command(about = "Sum numeric values of nested JSON by path", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Input is an envelope object; aggregate its "data" value
    #[arg(long)]
    payload: bool,

    /// Process newline-delimited JSON, accumulating across lines
    #[arg(long)]
    ndjson: bool,

    /// Separator between path segments (default: ".")
    #[arg(long)]
    separator: Option<String>,

    /// Maximum nesting depth accepted (default: 64)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    sieve::init_tracing();
    let args = Args::parse();

    let mut config = AggregateConfig::default();
    if let Some(sep) = args.separator.clone() {
        config.separator = sep;
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?)
    } else {
        Box::new(std::io::stdin())
    };
    let reader = BufReader::new(reader);

    let result = if args.ndjson {
        sum_lines(reader, &config, args.payload)
    } else {
        let mut content = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut content).context("Failed to read input")?;
        parse_json(&content, config.max_depth).and_then(|value| sum_document(&value, &config, args.payload))
    };

    let response = ToolResponse::from_result(result.map(|totals| totals.sorted()));
    let mut writer = JsonWriter::new(std::io::stdout().lock(), !args.compact);
    writer.write_value(&response)?;
    writer.flush()?;

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn sum_document(value: &Value, config: &AggregateConfig, payload: bool) -> sieve::Result<AggregateMap> {
    let data = if payload { extract_payload(value)? } else { value };
    column_sums(data, config)
}

/// Accumulate over every line; a malformed line aborts the whole run
fn sum_lines<R: BufRead>(reader: R, config: &AggregateConfig, payload: bool) -> sieve::Result<AggregateMap> {
    let mut aggregator = PathAggregator::with_config(config);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = parse_json(line.as_bytes(), config.max_depth)?;
        let data = if payload { extract_payload(&value)? } else { &value };
        aggregator.add(data);
    }

    let totals = aggregator.finish();
    if totals.is_empty() {
        return Err(SieveError::EmptyInput("No numeric fields found.".to_string()));
    }
    Ok(totals)
}
