use crate::error::{Result, SeqEvolveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One letter of the nucleotide alphabet.
///
/// The discriminant doubles as the one-hot channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::A, Symbol::C, Symbol::G, Symbol::T];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            'A' => Some(Symbol::A),
            'C' => Some(Symbol::C),
            'G' => Some(Symbol::G),
            'T' => Some(Symbol::T),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::C => 'C',
            Symbol::G => 'G',
            Symbol::T => 'T',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Target composition of the alphabet, indexed by `Symbol::index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolFrequencies([f64; 4]);

impl SymbolFrequencies {
    pub const TOLERANCE: f64 = 1e-6;

    pub fn new(values: [f64; 4]) -> Result<Self> {
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SeqEvolveError::Configuration(format!(
                "Nucleotide frequencies must be finite and non-negative, got {:?}",
                values
            )));
        }
        let total: f64 = values.iter().sum();
        if (total - 1.0).abs() > Self::TOLERANCE {
            return Err(SeqEvolveError::Configuration(format!(
                "Nucleotide frequencies must sum to 1, got {:.6}",
                total
            )));
        }
        // A symbol holding all the mass leaves nothing to mutate into.
        if let Some(symbol) = Symbol::ALL
            .iter()
            .find(|s| 1.0 - values[s.index()] <= Self::TOLERANCE)
        {
            return Err(SeqEvolveError::Configuration(format!(
                "Nucleotide frequency of {} must be below 1",
                symbol
            )));
        }
        Ok(Self(values))
    }

    pub fn uniform() -> Self {
        Self([0.25; 4])
    }

    pub fn get(&self, symbol: Symbol) -> f64 {
        self.0[symbol.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }
}

impl Default for SymbolFrequencies {
    fn default() -> Self {
        Self::uniform()
    }
}

/// A candidate sequence and its fitness for the current generation.
///
/// `fitness` is `None` until the individual is scored, and is reset whenever
/// a variation operator touches the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub sequence: Vec<Symbol>,
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(sequence: Vec<Symbol>) -> Self {
        Self {
            sequence,
            fitness: None,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    pub fn sequence_string(&self) -> String {
        self.sequence.iter().map(|s| s.as_char()).collect()
    }
}

impl std::str::FromStr for Individual {
    type Err = SeqEvolveError;

    fn from_str(s: &str) -> Result<Self> {
        crate::data::codec::parse_sequence(s).map(Individual::new)
    }
}

/// Check that a population is non-empty and shares a single sequence length.
pub fn validate_population(population: &[Individual], expected_len: usize) -> Result<()> {
    if population.is_empty() {
        return Err(SeqEvolveError::Configuration(
            "Population must not be empty".to_string(),
        ));
    }
    if let Some((i, ind)) = population
        .iter()
        .enumerate()
        .find(|(_, ind)| ind.len() != expected_len)
    {
        return Err(SeqEvolveError::Configuration(format!(
            "Individual {} has length {}, expected {}",
            i,
            ind.len(),
            expected_len
        )));
    }
    Ok(())
}
