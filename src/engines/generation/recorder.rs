use crate::error::Result;
use polars::df;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One scored offspring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub id: usize,
    pub sequence: String,
    pub fitness: f64,
}

/// Append-only log of every scored offspring across a run.
#[derive(Debug, Clone, Default)]
pub struct RunRecorder {
    records: Vec<GenerationRecord>,
}

impl RunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a recorder from records persisted in a checkpoint.
    pub fn from_records(records: Vec<GenerationRecord>) -> Self {
        Self { records }
    }

    pub fn record(&mut self, generation: usize, id: usize, sequence: String, fitness: f64) {
        self.records.push(GenerationRecord {
            generation,
            id,
            sequence,
            fitness,
        });
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// History as a table with columns `generation, fitness, sequences, id`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let generation: Vec<i64> = self.records.iter().map(|r| r.generation as i64).collect();
        let fitness: Vec<f64> = self.records.iter().map(|r| r.fitness).collect();
        let sequences: Vec<&str> = self.records.iter().map(|r| r.sequence.as_str()).collect();
        let id: Vec<i64> = self.records.iter().map(|r| r.id as i64).collect();

        let df = df! {
            "generation" => generation,
            "fitness" => fitness,
            "sequences" => sequences,
            "id" => id,
        }?;
        Ok(df)
    }

    /// Best, mean and worst fitness per generation, in generation order.
    pub fn generation_summary(&self) -> Result<DataFrame> {
        let summary = self
            .to_dataframe()?
            .lazy()
            .group_by_stable([col("generation")])
            .agg([
                col("fitness").max().alias("best"),
                col("fitness").mean().alias("mean"),
                col("fitness").min().alias("worst"),
                col("id").count().alias("size"),
            ])
            .collect()?;
        Ok(summary)
    }

    /// Write the history as CSV, header included, no index column.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        log::info!(
            "Wrote {} history rows to {}",
            df.height(),
            path.as_ref().display()
        );
        Ok(())
    }
}
