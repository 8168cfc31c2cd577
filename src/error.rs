use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeqEvolveError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Generation {generation} failed: {source}")]
    Generation {
        generation: usize,
        #[source]
        source: Box<SeqEvolveError>,
    },

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SeqEvolveError {
    /// Attach the generation index to an error raised inside the loop.
    pub fn in_generation(self, generation: usize) -> Self {
        match self {
            // already tagged
            e @ SeqEvolveError::Generation { .. } => e,
            e => SeqEvolveError::Generation {
                generation,
                source: Box::new(e),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SeqEvolveError>;
