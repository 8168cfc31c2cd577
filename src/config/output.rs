use super::traits::ConfigSection;
use crate::error::SeqEvolveError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_file: PathBuf,
    /// Sequences to start from instead of a random population.
    pub initial_population: Option<PathBuf>,
    pub checkpoint_dir: Option<PathBuf>,
    pub checkpoint_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from("evolution_fits_df.csv"),
            initial_population: None,
            checkpoint_dir: None,
            checkpoint_every: 10,
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), SeqEvolveError> {
        if self.checkpoint_dir.is_some() && self.checkpoint_every == 0 {
            return Err(SeqEvolveError::Configuration(
                "Checkpoint interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
