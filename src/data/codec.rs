use crate::error::{Result, SeqEvolveError};
use crate::types::Symbol;
use rayon::prelude::*;

pub const CHANNELS: usize = 4;

/// One-hot encoding of a single sequence, shape `(CHANNELS, length)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHot {
    pub length: usize,
    pub data: Vec<f32>,
}

impl OneHot {
    pub fn get(&self, channel: usize, position: usize) -> f32 {
        self.data[channel * self.length + position]
    }
}

/// Stacked one-hot encodings, shape `(batch, CHANNELS, length)`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBatch {
    pub batch: usize,
    pub length: usize,
    pub data: Vec<f32>,
}

impl EncodedBatch {
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.batch, CHANNELS, self.length)
    }

    /// Flat `(CHANNELS * length)` slice for one item.
    pub fn item(&self, index: usize) -> &[f32] {
        let stride = CHANNELS * self.length;
        &self.data[index * stride..(index + 1) * stride]
    }
}

pub fn parse_sequence(sequence: &str) -> Result<Vec<Symbol>> {
    sequence
        .chars()
        .enumerate()
        .map(|(position, c)| {
            Symbol::from_char(c).ok_or_else(|| {
                SeqEvolveError::Encoding(format!(
                    "Unrecognized symbol '{}' at position {}",
                    c, position
                ))
            })
        })
        .collect()
}

pub fn decode(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

pub fn encode(sequence: &str) -> Result<OneHot> {
    encode_symbols(&parse_sequence(sequence)?)
}

pub fn encode_symbols(symbols: &[Symbol]) -> Result<OneHot> {
    if symbols.is_empty() {
        return Err(SeqEvolveError::Encoding(
            "Cannot encode a zero-length sequence".to_string(),
        ));
    }
    let length = symbols.len();
    let mut data = vec![0.0f32; CHANNELS * length];
    for (position, symbol) in symbols.iter().enumerate() {
        data[symbol.index() * length + position] = 1.0;
    }
    Ok(OneHot { length, data })
}

/// Encode every sequence and stack them in input order.
pub fn encode_batch<S: AsRef<[Symbol]> + Sync>(sequences: &[S]) -> Result<EncodedBatch> {
    let length = match sequences.first() {
        Some(first) => first.as_ref().len(),
        None => {
            return Ok(EncodedBatch {
                batch: 0,
                length: 0,
                data: Vec::new(),
            })
        }
    };

    if let Some(i) = sequences.iter().position(|s| s.as_ref().len() != length) {
        return Err(SeqEvolveError::Encoding(format!(
            "Sequence {} has length {}, expected {}",
            i,
            sequences[i].as_ref().len(),
            length
        )));
    }

    let encoded: Vec<OneHot> = sequences
        .par_iter()
        .map(|s| encode_symbols(s.as_ref()))
        .collect::<Result<_>>()?;

    let mut data = Vec::with_capacity(sequences.len() * CHANNELS * length);
    for one_hot in &encoded {
        data.extend_from_slice(&one_hot.data);
    }

    Ok(EncodedBatch {
        batch: sequences.len(),
        length,
        data,
    })
}

/// Parse and encode raw sequence strings.
pub fn encode_strings(sequences: &[&str]) -> Result<EncodedBatch> {
    let parsed = sequences
        .iter()
        .map(|s| parse_sequence(s))
        .collect::<Result<Vec<_>>>()?;
    encode_batch(&parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_channel_major() {
        let one_hot = encode("ACGT").unwrap();
        assert_eq!(one_hot.length, 4);
        for position in 0..4 {
            for channel in 0..CHANNELS {
                let expected = if channel == position { 1.0 } else { 0.0 };
                assert_eq!(one_hot.get(channel, position), expected);
            }
        }
    }

    #[test]
    fn test_encode_rejects_unknown_and_empty() {
        assert!(matches!(encode("ACNT"), Err(SeqEvolveError::Encoding(_))));
        assert!(matches!(encode(""), Err(SeqEvolveError::Encoding(_))));
    }

    #[test]
    fn test_encode_batch_preserves_order() {
        let batch = encode_strings(&["AAAA", "TTTT", "CCCC"]).unwrap();
        assert_eq!(batch.shape(), (3, 4, 4));
        assert_eq!(batch.item(0), encode("AAAA").unwrap().data.as_slice());
        assert_eq!(batch.item(1), encode("TTTT").unwrap().data.as_slice());
        assert_eq!(batch.item(2), encode("CCCC").unwrap().data.as_slice());
    }

    #[test]
    fn test_encode_batch_rejects_mixed_lengths() {
        assert!(encode_strings(&["ACGT", "ACG"]).is_err());
    }

    #[test]
    fn test_decode_roundtrip() {
        assert_eq!(decode(&parse_sequence("GATTACA").unwrap()), "GATTACA");
    }
}
