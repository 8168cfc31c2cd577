use crate::types::Individual;
use std::collections::HashSet;

/// Best distinct sequences seen at any point of a run.
///
/// Unlike the evolving population, entries here never get lost to selection
/// drift.
#[derive(Debug, Clone)]
pub struct HallOfFame {
    entries: Vec<Individual>,
    max_size: usize,
    seen_sequences: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
            seen_sequences: HashSet::new(),
        }
    }

    /// Rebuild from a persisted list, keeping its order and size bound.
    pub fn from_entries(max_size: usize, entries: Vec<Individual>) -> Self {
        let mut hof = Self::new(max_size);
        for entry in entries {
            hof.try_add(&entry);
        }
        hof
    }

    /// Attempt to add an evaluated individual
    pub fn try_add(&mut self, individual: &Individual) -> bool {
        let fitness = match individual.fitness {
            Some(f) => f,
            None => return false,
        };
        if self.max_size == 0 {
            return false;
        }

        let signature = individual.sequence_string();
        if self.seen_sequences.contains(&signature) {
            return false;
        }

        if self.entries.len() >= self.max_size {
            let worst = self
                .entries
                .last()
                .and_then(|e| e.fitness)
                .unwrap_or(f64::NEG_INFINITY);
            if fitness <= worst {
                return false;
            }
        }

        // Insert after every entry at least as good, so earlier finds win ties.
        let position = self
            .entries
            .iter()
            .position(|e| e.fitness.map_or(true, |f| f < fitness))
            .unwrap_or(self.entries.len());
        self.entries.insert(position, individual.clone());
        self.seen_sequences.insert(signature);

        while self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen_sequences.remove(&removed.sequence_string());
            }
        }

        true
    }

    pub fn get_all(&self) -> &[Individual] {
        &self.entries
    }

    pub fn best(&self) -> Option<&Individual> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
