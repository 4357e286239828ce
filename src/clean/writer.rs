use crate::aggregate::walker::AggregateMap;
use crate::clean::loader::Record;
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes pipeline results as JSON documents
pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl JsonWriter<BufWriter<File>> {
    /// Create a writer for a file, truncating it if it exists
    pub fn create<P: AsRef<Path>>(path: P, pretty: bool) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(JsonWriter::new(BufWriter::new(file), pretty))
    }
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        JsonWriter { writer, pretty }
    }

    /// Write any serializable value followed by a newline
    pub fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Write projected records as a JSON array
    pub fn write_records(&mut self, records: &[Record]) -> Result<()> {
        self.write_value(records)
    }

    /// Write an aggregate map as a JSON object with paths in sorted order
    pub fn write_aggregate(&mut self, aggregate: &AggregateMap) -> Result<()> {
        self.write_value(&aggregate.sorted())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
