use super::traits::ConfigSection;
use crate::error::SeqEvolveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    /// Per-position substitution probability once an individual mutates.
    pub indpb: f64,
    pub cxpb: f64,
    pub mutpb: f64,
    pub tournament_size: usize,
    pub top_k: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            num_generations: 90,
            indpb: 0.025,
            cxpb: 0.01,
            mutpb: 0.01,
            tournament_size: 3,
            top_k: 10,
            hall_of_fame_size: 10,
            seed: Some(12345),
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), SeqEvolveError> {
        if self.population_size == 0 {
            return Err(SeqEvolveError::Configuration(
                "Population size must be positive".to_string()
            ));
        }
        if self.num_generations == 0 {
            return Err(SeqEvolveError::Configuration(
                "Number of generations must be positive".to_string()
            ));
        }
        if self.tournament_size == 0 {
            return Err(SeqEvolveError::Configuration(
                "Tournament size must be positive".to_string()
            ));
        }
        for (name, rate) in [("indpb", self.indpb), ("cxpb", self.cxpb), ("mutpb", self.mutpb)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SeqEvolveError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        Ok(())
    }
}
