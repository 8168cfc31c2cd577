use crate::data::codec::{self, EncodedBatch};
use crate::error::{Result, SeqEvolveError};
use crate::types::Individual;

pub const DEFAULT_BATCH_SIZE: usize = 32;

/// External scoring model.
///
/// `predict` receives a batch shaped `(batch, 4, length)` and returns a flat
/// row-major buffer of `batch * channels` scores, where `channels` is the
/// width declared by the adapter's `OutputShape`.
pub trait Oracle {
    fn predict(&self, batch: &EncodedBatch) -> Result<Vec<f64>>;
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn predict(&self, batch: &EncodedBatch) -> Result<Vec<f64>> {
        (**self).predict(batch)
    }
}

/// In-process oracle backed by a closure.
pub struct FnOracle<F>(pub F);

impl<F> Oracle for FnOracle<F>
where
    F: Fn(&EncodedBatch) -> Result<Vec<f64>>,
{
    fn predict(&self, batch: &EncodedBatch) -> Result<Vec<f64>> {
        (self.0)(batch)
    }
}

/// Width of the oracle's per-item output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// One score per item.
    Scalar,
    /// `channels` scores per item; fitness is column `select`.
    MultiChannel { channels: usize, select: usize },
}

impl OutputShape {
    pub fn from_channels(channels: usize, select: usize) -> Result<Self> {
        match channels {
            0 => Err(SeqEvolveError::Configuration(
                "Oracle must produce at least one output channel".to_string(),
            )),
            1 if select == 0 => Ok(OutputShape::Scalar),
            _ if select < channels => Ok(OutputShape::MultiChannel { channels, select }),
            _ => Err(SeqEvolveError::Configuration(format!(
                "Selected output channel {} is out of range for {} channels",
                select, channels
            ))),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            OutputShape::Scalar => 1,
            OutputShape::MultiChannel { channels, .. } => *channels,
        }
    }

    fn extract(&self, raw: Vec<f64>) -> Vec<f64> {
        match *self {
            OutputShape::Scalar => raw,
            OutputShape::MultiChannel { channels, select } => raw
                .chunks_exact(channels)
                .map(|row| row[select])
                .collect(),
        }
    }
}

/// Batches individuals through an `Oracle`, hiding batch boundaries.
pub struct OracleAdapter<O> {
    oracle: O,
    shape: OutputShape,
    batch_size: usize,
}

impl<O: Oracle> OracleAdapter<O> {
    pub fn new(oracle: O, shape: OutputShape) -> Self {
        Self {
            oracle,
            shape,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Score every individual, returning one fitness per input in input order.
    pub fn score(&self, individuals: &[Individual]) -> Result<Vec<f64>> {
        let mut scores = Vec::with_capacity(individuals.len());

        for (batch_index, chunk) in individuals.chunks(self.batch_size).enumerate() {
            let sequences: Vec<&[_]> = chunk.iter().map(|i| i.sequence.as_slice()).collect();
            let encoded = codec::encode_batch(&sequences)?;

            let raw = self.oracle.predict(&encoded)?;
            let expected = chunk.len() * self.shape.channels();
            if raw.len() != expected {
                return Err(SeqEvolveError::ShapeMismatch(format!(
                    "batch {}: oracle returned {} values for {} items x {} channels",
                    batch_index,
                    raw.len(),
                    chunk.len(),
                    self.shape.channels()
                )));
            }

            let batch_scores = self.shape.extract(raw);
            if let Some((item, value)) = batch_scores
                .iter()
                .enumerate()
                .find(|(_, value)| !value.is_finite())
            {
                return Err(SeqEvolveError::ShapeMismatch(format!(
                    "batch {}: oracle returned non-finite score {} for item {}",
                    batch_index, value, item
                )));
            }

            log::debug!("Scored batch {} ({} items)", batch_index, chunk.len());
            scores.extend(batch_scores);
        }

        Ok(scores)
    }
}
