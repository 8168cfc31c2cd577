use crate::engines::generation::recorder::GenerationRecord;
use crate::error::{Result, SeqEvolveError};
use crate::types::Individual;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run state at a generation boundary, enough to resume the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// First generation still to run.
    pub next_generation: usize,
    pub seed: u64,
    pub sequence_length: usize,
    /// Survivors of the last completed selection, fitness included.
    pub population: Vec<Individual>,
    pub records: Vec<GenerationRecord>,
    pub hall_of_fame: Vec<Individual>,
    pub created_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn file_name(next_generation: usize) -> String {
        format!("checkpoint_gen_{:05}.json", next_generation)
    }

    /// Write into `dir`, creating it if needed. Returns the file path.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(Self::file_name(self.next_generation));
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(self)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            SeqEvolveError::Checkpoint(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        let checkpoint: Checkpoint = serde_json::from_slice(&bytes)?;

        if checkpoint.population.iter().any(|i| !i.is_evaluated()) {
            return Err(SeqEvolveError::Checkpoint(format!(
                "{} holds unevaluated individuals",
                path.as_ref().display()
            )));
        }
        Ok(checkpoint)
    }

    /// Most advanced checkpoint in `dir`, if any.
    pub fn latest_in<P: AsRef<Path>>(dir: P) -> Result<Option<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(None);
        }
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("checkpoint_gen_") && n.ends_with(".json"))
                    .unwrap_or(false)
            })
            .collect();
        // zero-padded names sort by generation
        candidates.sort();
        Ok(candidates.pop())
    }
}
