use crate::data::checkpoint::Checkpoint;
use crate::engines::generation::{
    hall_of_fame::HallOfFame,
    operators::{random_individual, select_best, select_tournament, vary, FrequencyMutator, VariationParams},
    progress::{GenerationStats, ProgressCallback},
    recorder::RunRecorder,
};
use crate::engines::oracle::{Oracle, OracleAdapter};
use crate::error::{Result, SeqEvolveError};
use crate::random::RandomContext;
use crate::types::{validate_population, Individual, SymbolFrequencies};
use chrono::Utc;
use std::path::PathBuf;

/// Where and how often to persist generation-boundary checkpoints.
#[derive(Debug, Clone)]
pub struct CheckpointPolicy {
    pub dir: PathBuf,
    pub every: usize,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub population_size: usize,
    pub generations: usize,
    pub sequence_length: usize,
    pub frequencies: SymbolFrequencies,
    pub variation: VariationParams,
    pub tournament_size: usize,
    pub top_k: usize,
    pub hall_of_fame_size: usize,
    pub checkpoint: Option<CheckpointPolicy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 90,
            sequence_length: 249,
            frequencies: SymbolFrequencies::uniform(),
            variation: VariationParams {
                cxpb: 0.01,
                mutpb: 0.01,
                indpb: 0.025,
            },
            tournament_size: 3,
            top_k: 10,
            hall_of_fame_size: 10,
            checkpoint: None,
        }
    }
}

impl EngineConfig {
    /// Tournaments this large always pick the current best, so selection
    /// stops drawing at random and the population collapses to clones.
    pub fn tournament_covers_population(&self) -> bool {
        self.tournament_size >= self.population_size
    }

    fn warn_on_whole_pool_tournament(&self) {
        if self.tournament_covers_population() {
            log::warn!(
                "Tournament size {} covers the whole population of {}; selection will clone the best individual",
                self.tournament_size,
                self.population_size
            );
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SeqEvolveError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(SeqEvolveError::Configuration(
                "Number of generations must be positive".to_string(),
            ));
        }
        if self.sequence_length == 0 {
            return Err(SeqEvolveError::Configuration(
                "Sequence length must be positive".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(SeqEvolveError::Configuration(
                "Tournament size must be positive".to_string(),
            ));
        }
        let VariationParams { cxpb, mutpb, indpb } = self.variation;
        for (name, p) in [("cxpb", cxpb), ("mutpb", mutpb), ("indpb", indpb)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SeqEvolveError::Configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }
        if let Some(policy) = &self.checkpoint {
            if policy.every == 0 {
                return Err(SeqEvolveError::Configuration(
                    "Checkpoint interval must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Initialized,
    Evaluating { generation: usize },
    Selecting { generation: usize },
    Terminated,
}

/// Everything a finished run hands back.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub history: RunRecorder,
    /// Top-K of the final population, best first.
    pub top: Vec<Individual>,
    /// Best distinct sequences seen over the whole run.
    pub hall_of_fame: Vec<Individual>,
    pub final_population: Vec<Individual>,
    pub seed: u64,
}

pub struct EvolutionEngine<O> {
    config: EngineConfig,
    adapter: OracleAdapter<O>,
    mutator: FrequencyMutator,
    rng: RandomContext,
    recorder: RunRecorder,
    hall_of_fame: HallOfFame,
    state: EngineState,
}

impl<O: Oracle> EvolutionEngine<O> {
    pub fn new(config: EngineConfig, adapter: OracleAdapter<O>, rng: RandomContext) -> Result<Self> {
        config.validate()?;
        config.warn_on_whole_pool_tournament();
        let mutator = FrequencyMutator::new(&config.frequencies)?;
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            adapter,
            mutator,
            rng,
            recorder: RunRecorder::new(),
            hall_of_fame,
            state: EngineState::Initialized,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every generation, starting from `initial` or from a random
    /// population drawn from the target frequencies.
    pub fn run<C: ProgressCallback>(
        &mut self,
        initial: Option<Vec<Individual>>,
        mut callback: C,
    ) -> Result<RunOutcome> {
        let population = match initial {
            Some(population) => self.accept_population(population)?,
            None => self.initialize_population()?,
        };
        log::info!(
            "Starting evolution: {} individuals of length {}, {} generations, seed {}",
            population.len(),
            self.config.sequence_length,
            self.config.generations,
            self.rng.seed()
        );
        self.evolve(population, 0, &mut callback)
    }

    /// Continue a run from a generation-boundary checkpoint.
    pub fn resume<C: ProgressCallback>(
        &mut self,
        checkpoint: Checkpoint,
        mut callback: C,
    ) -> Result<RunOutcome> {
        self.rng = RandomContext::new(Some(checkpoint.seed));
        self.config.sequence_length = checkpoint.sequence_length;
        validate_population(&checkpoint.population, checkpoint.sequence_length)?;
        self.recorder = RunRecorder::from_records(checkpoint.records);
        self.hall_of_fame =
            HallOfFame::from_entries(self.config.hall_of_fame_size, checkpoint.hall_of_fame);

        log::info!(
            "Resuming at generation {}/{} with {} individuals",
            checkpoint.next_generation + 1,
            self.config.generations,
            checkpoint.population.len()
        );
        self.evolve(checkpoint.population, checkpoint.next_generation, &mut callback)
    }

    fn initialize_population(&mut self) -> Result<Vec<Individual>> {
        (0..self.config.population_size)
            .map(|_| {
                random_individual(
                    self.config.sequence_length,
                    &self.config.frequencies,
                    &mut self.rng,
                )
            })
            .collect()
    }

    /// Adopt a caller-supplied population. Its size and length win over the
    /// configured ones; every member must share one length.
    fn accept_population(&mut self, population: Vec<Individual>) -> Result<Vec<Individual>> {
        let length = population.first().map(|i| i.len()).unwrap_or(0);
        if length == 0 {
            return Err(SeqEvolveError::Configuration(
                "Initial population must hold non-empty sequences".to_string(),
            ));
        }
        validate_population(&population, length)?;

        if length != self.config.sequence_length {
            log::warn!(
                "Initial population has length {}, overriding configured {}",
                length,
                self.config.sequence_length
            );
            self.config.sequence_length = length;
        }
        if population.len() != self.config.population_size {
            log::warn!(
                "Initial population has {} individuals, overriding configured {}",
                population.len(),
                self.config.population_size
            );
            self.config.population_size = population.len();
            self.config.warn_on_whole_pool_tournament();
        }
        Ok(population)
    }

    fn evolve<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Individual>,
        start: usize,
        callback: &mut C,
    ) -> Result<RunOutcome> {
        for generation in start..self.config.generations {
            callback.on_generation_start(generation);

            population = self
                .run_generation(generation, &population, callback)
                .map_err(|e| e.in_generation(generation))?;

            if let Some(policy) = self.config.checkpoint.clone() {
                if (generation + 1) % policy.every == 0 && generation + 1 < self.config.generations {
                    let path = self
                        .checkpoint(generation + 1, &population)
                        .save(&policy.dir)
                        .map_err(|e| e.in_generation(generation))?;
                    callback.on_checkpoint_saved(generation, &path);
                }
            }
        }

        self.state = EngineState::Terminated;
        let top = select_best(&population, self.config.top_k);

        Ok(RunOutcome {
            history: std::mem::take(&mut self.recorder),
            top,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            final_population: population,
            seed: self.rng.seed(),
        })
    }

    fn run_generation<C: ProgressCallback>(
        &mut self,
        generation: usize,
        population: &[Individual],
        callback: &mut C,
    ) -> Result<Vec<Individual>> {
        self.rng.enter_generation(generation);

        // Variation
        let mut offspring = vary(population, self.config.variation, &self.mutator, &mut self.rng);

        // Evaluation: every offspring is rescored, mutated or not
        self.state = EngineState::Evaluating { generation };
        let scores = self.adapter.score(&offspring)?;

        for (id, (individual, fitness)) in offspring.iter_mut().zip(&scores).enumerate() {
            individual.fitness = Some(*fitness);
            self.recorder
                .record(generation, id, individual.sequence_string(), *fitness);
            self.hall_of_fame.try_add(individual);
        }

        callback.on_generation_complete(&GenerationStats::from_scores(
            generation,
            self.config.generations,
            &scores,
            self.hall_of_fame.best().and_then(|i| i.fitness),
        ));

        // Selection
        self.state = EngineState::Selecting { generation };
        select_tournament(
            &offspring,
            offspring.len(),
            self.config.tournament_size,
            &mut self.rng,
        )
    }

    fn checkpoint(&self, next_generation: usize, population: &[Individual]) -> Checkpoint {
        Checkpoint {
            next_generation,
            seed: self.rng.seed(),
            sequence_length: self.config.sequence_length,
            population: population.to_vec(),
            records: self.recorder.records().to_vec(),
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            created_at: Utc::now(),
        }
    }
}
