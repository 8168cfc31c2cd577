use crate::error::{Result, SeqEvolveError};
use crate::types::Individual;
use polars::df;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Accepted names for the sequence column of a population CSV.
const SEQUENCE_ALIASES: [&str; 4] = ["sequences", "sequence", "Sequences", "Sequence"];

pub struct PopulationConnector;

impl PopulationConnector {
    /// Load an initial population.
    ///
    /// `.csv` files must carry a sequence column (see `SEQUENCE_ALIASES`);
    /// anything else is read as plain text with one sequence per line.
    /// Blank lines are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Individual>> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let sequences = if is_csv {
            Self::read_csv_sequences(path)?
        } else {
            std::fs::read_to_string(path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        };

        let population = sequences
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.parse::<Individual>().map_err(|e| {
                    SeqEvolveError::Encoding(format!("{}: sequence {}: {}", path.display(), i, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Loaded {} sequences from {}",
            population.len(),
            path.display()
        );
        Ok(population)
    }

    /// Write a population as CSV with `sequences` and `fitness` columns.
    pub fn save<P: AsRef<Path>>(path: P, population: &[Individual]) -> Result<()> {
        let sequences: Vec<String> = population.iter().map(|i| i.sequence_string()).collect();
        let fitness: Vec<Option<f64>> = population.iter().map(|i| i.fitness).collect();

        let mut df = df! {
            "sequences" => sequences,
            "fitness" => fitness,
        }?;

        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(())
    }

    fn read_csv_sequences(path: &Path) -> Result<Vec<String>> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        let column_name = Self::find_sequence_column(&df).ok_or_else(|| {
            SeqEvolveError::Configuration(format!(
                "{} has no sequence column (expected one of {:?})",
                path.display(),
                SEQUENCE_ALIASES
            ))
        })?;

        let column = df.column(&column_name)?;
        let sequences = column
            .str()?
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(sequences)
    }

    fn find_sequence_column(df: &DataFrame) -> Option<String> {
        let columns = df.get_column_names();
        SEQUENCE_ALIASES
            .iter()
            .find(|&&alias| columns.iter().any(|col| col.as_str() == alias))
            .map(|alias| alias.to_string())
    }
}
