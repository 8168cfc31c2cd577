/// Hooks invoked by the engine as a run advances.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_checkpoint_saved(&mut self, _generation: usize, _path: &std::path::Path) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation)
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        (**self).on_generation_complete(stats)
    }

    fn on_checkpoint_saved(&mut self, generation: usize, path: &std::path::Path) {
        (**self).on_checkpoint_saved(generation, path)
    }
}

/// Fitness summary of one generation's offspring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub total_generations: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub worst_fitness: f64,
    pub hall_of_fame_best: Option<f64>,
}

impl GenerationStats {
    pub fn from_scores(
        generation: usize,
        total_generations: usize,
        scores: &[f64],
        hall_of_fame_best: Option<f64>,
    ) -> Self {
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        Self {
            generation,
            total_generations,
            best_fitness: best,
            mean_fitness: mean,
            worst_fitness: worst,
            hall_of_fame_best,
        }
    }
}

/// Reports progress through the `log` facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        log::info!(
            "Generation {}/{} complete. Best: {:.4}, mean: {:.4}, worst: {:.4}, all-time best: {}",
            stats.generation + 1,
            stats.total_generations,
            stats.best_fitness,
            stats.mean_fitness,
            stats.worst_fitness,
            stats
                .hall_of_fame_best
                .map(|f| format!("{:.4}", f))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    fn on_checkpoint_saved(&mut self, generation: usize, path: &std::path::Path) {
        log::info!(
            "Checkpoint after generation {} saved to {}",
            generation + 1,
            path.display()
        );
    }
}

/// Ignores every notification.
pub struct NoopProgressCallback;

impl ProgressCallback for NoopProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_scores() {
        let stats = GenerationStats::from_scores(0, 5, &[1.0, 4.0, 1.0], Some(4.0));
        assert_eq!(stats.best_fitness, 4.0);
        assert_eq!(stats.worst_fitness, 1.0);
        assert_eq!(stats.mean_fitness, 2.0);
    }
}
