//! sieve-clean: Keep only the consistently clean fields of a JSON array
//!
//! Usage:
//!   # Read from file, output to stdout
//!   sieve-clean messy.json
//!
//!   # Read from stdin, write to a file
//!   cat messy.json | sieve-clean -o cleaned.json
//!
//!   # Accept any non-null scalar field, reject non-object elements
//!   sieve-clean --acceptance flat-non-null --loader reject messy.json
//!
//! Failures are written to stdout as {"status": "error", "error": ..., "kind": ...}
//! and the process exits with status 1.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use sieve::clean::{clean_records, load_ndjson, load_records};
use sieve::{AcceptanceMode, CleanConfig, Cleaned, JsonWriter, LoaderMode, PresenceMode, ToolResponse};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sieve-clean")]
#[command(about = "Project a JSON array onto its consistently clean fields", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<String>,

    /// Process newline-delimited JSON (one record per line)
    #[arg(long)]
    ndjson: bool,

    /// How field presence is judged
    #[arg(long, value_enum, default_value_t = PresenceMode::Strict)]
    presence: PresenceMode,

    /// Rule deciding whether a field's values are clean
    #[arg(long, value_enum, default_value_t = AcceptanceMode::FieldLevelOr)]
    acceptance: AcceptanceMode,

    /// What to do with array elements that are not objects
    #[arg(long, value_enum, default_value_t = LoaderMode::DropNonObjects)]
    loader: LoaderMode,

    /// Maximum nesting depth accepted (default: 64)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the accepted field names instead of the records
    #[arg(long)]
    fields_only: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    sieve::init_tracing();
    let args = Args::parse();

    let mut config = CleanConfig {
        presence: args.presence,
        acceptance: args.acceptance,
        loader: args.loader,
        ..CleanConfig::default()
    };
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    if let Err(e) = run(&args, &config) {
        error!(error = %e, "cleaning failed");
        let mut writer = JsonWriter::new(std::io::stdout().lock(), !args.compact);
        writer.write_value(&ToolResponse::failure(&e))?;
        writer.flush()?;
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args, config: &CleanConfig) -> sieve::Result<()> {
    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(File::open(file_path)?)
    } else {
        Box::new(std::io::stdin())
    };

    let records = if args.ndjson {
        load_ndjson(BufReader::new(reader), config.loader, config.max_depth)?
    } else {
        let mut content = Vec::new();
        BufReader::new(reader).read_to_end(&mut content)?;
        load_records(&content, config.loader, config.max_depth)?
    };
    info!(records = records.len(), "loaded records");

    let cleaned = clean_records(&records, config)?;
    info!(fields = ?cleaned.fields, "keeping columns");

    let pretty = !args.compact;
    match &args.output {
        Some(path) => {
            let mut writer = JsonWriter::create(path, pretty)?;
            write_output(&mut writer, &cleaned, args.fields_only)?;
            writer.flush()?;
            info!(path = %path, "cleaned JSON saved");
        }
        None => {
            let mut writer = JsonWriter::new(std::io::stdout().lock(), pretty);
            write_output(&mut writer, &cleaned, args.fields_only)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_output<W: Write>(writer: &mut JsonWriter<W>, cleaned: &Cleaned, fields_only: bool) -> sieve::Result<()> {
    if fields_only {
        writer.write_value(&cleaned.fields)
    } else {
        writer.write_records(&cleaned.records)
    }
}
