pub mod evolution_engine;
pub mod hall_of_fame;
pub mod operators;
pub mod progress;
pub mod recorder;

pub use evolution_engine::{CheckpointPolicy, EngineConfig, EngineState, EvolutionEngine, RunOutcome};
pub use hall_of_fame::HallOfFame;
pub use operators::{FrequencyMutator, VariationParams};
pub use progress::{GenerationStats, LogProgressCallback, NoopProgressCallback, ProgressCallback};
pub use recorder::{GenerationRecord, RunRecorder};
