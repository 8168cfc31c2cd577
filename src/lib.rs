//! Genetic-algorithm optimizer for fixed-length nucleotide sequences scored
//! by an external black-box oracle.

pub mod cli;
pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod random;
pub mod types;

pub use error::{Result, SeqEvolveError};
pub use types::{Individual, Symbol, SymbolFrequencies};
