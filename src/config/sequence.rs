use super::traits::ConfigSection;
use crate::error::SeqEvolveError;
use crate::types::SymbolFrequencies;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub length: usize,
    /// Target composition in A, C, G, T order.
    pub nucleotide_frequency: [f64; 4],
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            length: 249,
            nucleotide_frequency: [0.25, 0.25, 0.25, 0.25],
        }
    }
}

impl SequenceConfig {
    pub fn frequencies(&self) -> Result<SymbolFrequencies, SeqEvolveError> {
        SymbolFrequencies::new(self.nucleotide_frequency)
    }
}

impl ConfigSection for SequenceConfig {
    fn section_name() -> &'static str {
        "sequence"
    }

    fn validate(&self) -> Result<(), SeqEvolveError> {
        if self.length == 0 {
            return Err(SeqEvolveError::Configuration(
                "Sequence length must be positive".to_string(),
            ));
        }
        self.frequencies()?;
        Ok(())
    }
}
