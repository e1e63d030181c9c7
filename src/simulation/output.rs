//! Where finished runs go
//!
//! Every sink takes one [`RunResult`] at a time. File sinks append, so
//! results from several invocations accumulate in one file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::core::error::Result;

use super::metrics::RunResult;

pub const CSV_HEADER: [&str; 8] = [
    "selector",
    "seed",
    "score",
    "steps",
    "deliveries",
    "battery",
    "duration_secs",
    "outcome",
];

pub trait ResultSink {
    fn record(&mut self, result: &RunResult) -> Result<()>;
}

/// Appends comma-separated rows, writing the header only into an empty file
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fields of one CSV record, in [`CSV_HEADER`] order
pub fn csv_record(result: &RunResult) -> [String; 8] {
    [
        result.selector.clone(),
        result.seed.to_string(),
        result.score.to_string(),
        result.steps.to_string(),
        result.deliveries.to_string(),
        result.battery.to_string(),
        format!("{:.2}", result.duration_secs),
        result.outcome.label().to_string(),
    ]
}

impl ResultSink for CsvFileSink {
    fn record(&mut self, result: &RunResult) -> Result<()> {
        let file = open_append(&self.path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = Writer::from_writer(file);
        if is_empty {
            writer.write_record(CSV_HEADER)?;
        }
        writer.write_record(csv_record(result))?;
        writer.flush()?;
        Ok(())
    }
}

/// Appends one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonLinesSink {
    fn record(&mut self, result: &RunResult) -> Result<()> {
        let mut writer = BufWriter::new(open_append(&self.path)?);
        serde_json::to_writer(&mut writer, result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Keeps results in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub results: Vec<RunResult>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn record(&mut self, result: &RunResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
