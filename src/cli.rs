use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// Evolve DNA sequences toward high oracle scores
///
/// Every flag overrides the matching value of the loaded configuration.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "seqevolve")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resume from a checkpoint file, or the newest one in a directory
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Length of DNA sequences
    #[arg(long = "sequence_length", value_name = "N")]
    pub sequence_length: Option<usize>,

    /// Target nucleotide frequencies, in A C G T order
    #[arg(long = "nucleotide_frequency", num_args = 4, value_names = ["A", "C", "G", "T"])]
    pub nucleotide_frequency: Option<Vec<f64>>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Oracle checkpoint location
    #[arg(long = "best_model_checkpoint", value_name = "PATH")]
    pub best_model_checkpoint: Option<PathBuf>,

    /// External scoring program
    #[arg(long = "oracle_command", value_name = "PROGRAM")]
    pub oracle_command: Option<String>,

    /// Per-position mutation probability
    #[arg(long, value_name = "P")]
    pub indpb: Option<f64>,

    /// Population size
    #[arg(long = "n", value_name = "N")]
    pub population_size: Option<usize>,

    /// Number of generations
    #[arg(long = "NGEN", value_name = "N")]
    pub generations: Option<usize>,

    /// History CSV path
    #[arg(long = "output_file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Sequences to start from (CSV or text)
    #[arg(long = "initial_population", value_name = "FILE")]
    pub initial_population: Option<PathBuf>,

    /// Write generation checkpoints here
    #[arg(long = "checkpoint_dir", value_name = "DIR")]
    pub checkpoint_dir: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(length) = self.sequence_length {
            config.sequence.length = length;
        }
        if let Some(freqs) = &self.nucleotide_frequency {
            if let Ok(freqs) = <[f64; 4]>::try_from(freqs.as_slice()) {
                config.sequence.nucleotide_frequency = freqs;
            }
        }
        if let Some(seed) = self.seed {
            config.evolution.seed = Some(seed);
        }
        if let Some(checkpoint) = &self.best_model_checkpoint {
            config.oracle.checkpoint = checkpoint.clone();
        }
        if let Some(command) = &self.oracle_command {
            config.oracle.command = Some(command.clone());
        }
        if let Some(indpb) = self.indpb {
            config.evolution.indpb = indpb;
        }
        if let Some(n) = self.population_size {
            config.evolution.population_size = n;
        }
        if let Some(generations) = self.generations {
            config.evolution.num_generations = generations;
        }
        if let Some(path) = &self.output_file {
            config.output.output_file = path.clone();
        }
        if let Some(path) = &self.initial_population {
            config.output.initial_population = Some(path.clone());
        }
        if let Some(dir) = &self.checkpoint_dir {
            config.output.checkpoint_dir = Some(dir.clone());
        }
    }
}
