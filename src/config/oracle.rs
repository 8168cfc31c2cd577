use super::traits::ConfigSection;
use crate::engines::oracle::OutputShape;
use crate::error::SeqEvolveError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Scoring program; `None` means no oracle is configured.
    pub command: Option<String>,
    pub args: Vec<String>,
    pub checkpoint: PathBuf,
    pub batch_size: usize,
    pub output_channels: usize,
    pub select_channel: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            checkpoint: PathBuf::from("checkpoint_keras"),
            batch_size: 32,
            output_channels: 1,
            select_channel: 0,
        }
    }
}

impl OracleConfig {
    pub fn output_shape(&self) -> Result<OutputShape, SeqEvolveError> {
        OutputShape::from_channels(self.output_channels, self.select_channel)
    }
}

impl ConfigSection for OracleConfig {
    fn section_name() -> &'static str {
        "oracle"
    }

    fn validate(&self) -> Result<(), SeqEvolveError> {
        if self.batch_size == 0 {
            return Err(SeqEvolveError::Configuration(
                "Oracle batch size must be positive".to_string(),
            ));
        }
        self.output_shape()?;
        Ok(())
    }
}
