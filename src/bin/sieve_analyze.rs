//! sieve-analyze: Summary statistics over a JSON list or named lists
//!
//! Usage:
//!   # [1, 2, 3, 4]  ->  {"status": "success", "result": {"sum": 10.0, ...}}
//!   sieve-analyze numbers.json
//!
//!   # {"a": [1, 2], "b": ["3", "x"]}  ->  one summary per group
//!   sieve-analyze --payload request.json --ops mean,max

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use sieve::clean::{extract_payload, parse_json};
use sieve::config::DEFAULT_MAX_DEPTH;
use sieve::{analyze, Analysis, JsonWriter, Operation, ToolResponse};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "sieve-analyze")]
#[command(about = "Summary statistics over numeric JSON lists", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Input is an envelope object; analyze its "data" value
    #[arg(long)]
    payload: bool,

    /// Comma-separated statistics to report (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    ops: Vec<Operation>,

    /// Reject documents nested deeper than this many containers
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    sieve::init_tracing();
    let args = Args::parse();

    let mut reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?,
        ))
    } else {
        Box::new(std::io::stdin())
    };
    let mut content = Vec::new();
    reader.read_to_end(&mut content).context("Failed to read input")?;

    let result = parse_json(&content, args.max_depth).and_then(|value| {
        let data = if args.payload { extract_payload(&value)? } else { &value };
        analyze(data)
    });

    let response = match result {
        Ok(analysis) => ToolResponse::Success {
            result: render(&analysis, &args.ops)?,
        },
        Err(e) => {
            tracing::error!(error = %e, "analysis failed");
            ToolResponse::failure(&e)
        }
    };

    let mut writer = JsonWriter::new(std::io::stdout().lock(), !args.compact);
    writer.write_value(&response)?;
    writer.flush()?;

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn render(analysis: &Analysis, ops: &[Operation]) -> Result<Value> {
    if ops.is_empty() {
        Ok(serde_json::to_value(analysis)?)
    } else {
        Ok(analysis.select(ops))
    }
}
