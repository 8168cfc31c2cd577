use super::{
    evolution::EvolutionConfig,
    oracle::OracleConfig,
    output::OutputConfig,
    sequence::SequenceConfig,
    traits::ConfigSection,
};
use crate::engines::generation::{CheckpointPolicy, EngineConfig, VariationParams};
use crate::error::SeqEvolveError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `SEQEVOLVE__EVOLUTION__NUM_GENERATIONS=5`.
pub const ENV_PREFIX: &str = "SEQEVOLVE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sequence: SequenceConfig,
    pub evolution: EvolutionConfig,
    pub oracle: OracleConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SeqEvolveError> {
        validate_section(&self.sequence)?;
        validate_section(&self.evolution)?;
        validate_section(&self.oracle)?;
        validate_section(&self.output)?;
        Ok(())
    }

    /// Settings the evolution engine runs with.
    pub fn engine_config(&self) -> Result<EngineConfig, SeqEvolveError> {
        Ok(EngineConfig {
            population_size: self.evolution.population_size,
            generations: self.evolution.num_generations,
            sequence_length: self.sequence.length,
            frequencies: self.sequence.frequencies()?,
            variation: VariationParams {
                cxpb: self.evolution.cxpb,
                mutpb: self.evolution.mutpb,
                indpb: self.evolution.indpb,
            },
            tournament_size: self.evolution.tournament_size,
            top_k: self.evolution.top_k,
            hall_of_fame_size: self.evolution.hall_of_fame_size,
            checkpoint: self.output.checkpoint_dir.clone().map(|dir| CheckpointPolicy {
                dir,
                every: self.output.checkpoint_every,
            }),
        })
    }
}

/// Validate one section, prefixing configuration errors with its name.
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), SeqEvolveError> {
    section.validate().map_err(|e| match e {
        SeqEvolveError::Configuration(msg) => {
            SeqEvolveError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SeqEvolveError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SeqEvolveError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| SeqEvolveError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        self.config = config;
        Ok(())
    }

    /// Build the configuration from defaults, an optional file, then
    /// `SEQEVOLVE__<SECTION>__<KEY>` environment variables.
    pub fn load_layered<P: AsRef<Path>>(&mut self, path: Option<P>) -> Result<(), SeqEvolveError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SeqEvolveError::Configuration(format!("Failed to load config: {}", e)))?;

        config.validate()?;

        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SeqEvolveError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| SeqEvolveError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| SeqEvolveError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), SeqEvolveError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
