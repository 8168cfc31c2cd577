use crate::error::{Result, SeqEvolveError};
use crate::types::{Individual, Symbol, SymbolFrequencies};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::cmp::Ordering;

fn fitness_of(individual: &Individual, index: usize) -> Result<f64> {
    individual.fitness.ok_or_else(|| {
        SeqEvolveError::Selection(format!("individual {} has not been evaluated", index))
    })
}

/// Tournament selection: pick best of K random candidates
///
/// Candidates are drawn with replacement; ties keep the first drawn. A
/// tournament at least as large as the pool is the whole pool, so the best
/// individual always wins it.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Result<&'a Individual> {
    if population.is_empty() {
        return Err(SeqEvolveError::Selection(
            "cannot select from an empty population".to_string(),
        ));
    }

    if tournament_size >= population.len() {
        let mut best_idx = 0;
        let mut best_fitness = fitness_of(&population[0], 0)?;
        for (idx, individual) in population.iter().enumerate().skip(1) {
            let fitness = fitness_of(individual, idx)?;
            if fitness > best_fitness {
                best_idx = idx;
                best_fitness = fitness;
            }
        }
        return Ok(&population[best_idx]);
    }

    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = fitness_of(&population[best_idx], best_idx)?;

    for _ in 1..tournament_size.max(1) {
        let idx = rng.gen_range(0..population.len());
        let fitness = fitness_of(&population[idx], idx)?;
        if fitness > best_fitness {
            best_idx = idx;
            best_fitness = fitness;
        }
    }

    Ok(&population[best_idx])
}

/// Run `k` tournaments and return the winners as a new population.
pub fn select_tournament<R: Rng>(
    population: &[Individual],
    k: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    (0..k)
        .map(|_| tournament_selection(population, tournament_size, rng).cloned())
        .collect()
}

/// Top `k` individuals by fitness, best first. Unevaluated individuals rank
/// last; ties keep population order.
pub fn select_best(population: &[Individual], k: usize) -> Vec<Individual> {
    let mut sorted: Vec<&Individual> = population.iter().collect();
    sorted.sort_by(|a, b| match (a.fitness, b.fitness) {
        (Some(fa), Some(fb)) => fb.total_cmp(&fa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.into_iter().take(k).cloned().collect()
}

/// Two-point crossover: swap the segment between two distinct cut points.
///
/// Sequences shorter than two symbols are left untouched.
pub fn crossover_two_point<R: Rng>(a: &mut Individual, b: &mut Individual, rng: &mut R) {
    let len = a.len().min(b.len());
    if len < 2 {
        return;
    }

    let mut start = rng.gen_range(1..=len);
    let mut end = rng.gen_range(1..len);
    if end >= start {
        end += 1;
    } else {
        std::mem::swap(&mut start, &mut end);
    }

    a.sequence[start..end].swap_with_slice(&mut b.sequence[start..end]);
    a.invalidate();
    b.invalidate();
}

/// Per-symbol substitution biased toward the target composition.
///
/// Each position is replaced with probability `indpb` by one of the other
/// three symbols, drawn with weight `freq[x] / (1 - freq[current])`.
pub struct FrequencyMutator {
    // alternatives[s] = the three symbols other than s, with their sampler
    alternatives: [([Symbol; 3], WeightedIndex<f64>); 4],
}

impl FrequencyMutator {
    pub fn new(frequencies: &SymbolFrequencies) -> Result<Self> {
        let build = |current: Symbol| -> Result<([Symbol; 3], WeightedIndex<f64>)> {
            let mut others = [Symbol::A; 3];
            let mut weights = [0.0; 3];
            let remaining = 1.0 - frequencies.get(current);
            for (slot, symbol) in Symbol::ALL.iter().filter(|s| **s != current).enumerate() {
                others[slot] = *symbol;
                weights[slot] = frequencies.get(*symbol) / remaining;
            }
            let sampler = WeightedIndex::new(weights).map_err(|e| {
                SeqEvolveError::Configuration(format!(
                    "cannot mutate away from {}: {}",
                    current, e
                ))
            })?;
            Ok((others, sampler))
        };

        Ok(Self {
            alternatives: [
                build(Symbol::A)?,
                build(Symbol::C)?,
                build(Symbol::G)?,
                build(Symbol::T)?,
            ],
        })
    }

    pub fn replacement<R: Rng>(&self, current: Symbol, rng: &mut R) -> Symbol {
        let (others, sampler) = &self.alternatives[current.index()];
        others[sampler.sample(rng)]
    }

    pub fn mutate<R: Rng>(&self, individual: &mut Individual, indpb: f64, rng: &mut R) {
        for position in 0..individual.sequence.len() {
            if rng.gen::<f64>() < indpb {
                let current = individual.sequence[position];
                individual.sequence[position] = self.replacement(current, rng);
            }
        }
        individual.invalidate();
    }
}

/// Convenience wrapper building a one-off `FrequencyMutator`.
pub fn mutate<R: Rng>(
    individual: &mut Individual,
    indpb: f64,
    frequencies: &SymbolFrequencies,
    rng: &mut R,
) -> Result<()> {
    FrequencyMutator::new(frequencies)?.mutate(individual, indpb, rng);
    Ok(())
}

/// Variation probabilities for one generation.
#[derive(Debug, Clone, Copy)]
pub struct VariationParams {
    pub cxpb: f64,
    pub mutpb: f64,
    pub indpb: f64,
}

/// Produce offspring from `population`: crossover on consecutive pairs
/// with probability `cxpb`, then mutation of each child with probability
/// `mutpb`. The parents are left untouched.
pub fn vary<R: Rng>(
    population: &[Individual],
    params: VariationParams,
    mutator: &FrequencyMutator,
    rng: &mut R,
) -> Vec<Individual> {
    let mut offspring = population.to_vec();

    for pair in offspring.chunks_exact_mut(2) {
        if rng.gen::<f64>() < params.cxpb {
            let (left, right) = pair.split_at_mut(1);
            crossover_two_point(&mut left[0], &mut right[0], rng);
        }
    }

    for child in offspring.iter_mut() {
        if rng.gen::<f64>() < params.mutpb {
            mutator.mutate(child, params.indpb, rng);
        }
    }

    offspring
}

/// Generate a random individual with symbols drawn from `frequencies`.
pub fn random_individual<R: Rng>(
    length: usize,
    frequencies: &SymbolFrequencies,
    rng: &mut R,
) -> Result<Individual> {
    let sampler = WeightedIndex::new(frequencies.as_array())
        .map_err(|e| SeqEvolveError::Configuration(format!("invalid frequencies: {}", e)))?;
    Ok(Individual::new(
        (0..length).map(|_| Symbol::ALL[sampler.sample(rng)]).collect(),
    ))
}
