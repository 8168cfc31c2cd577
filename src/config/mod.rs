pub mod traits;
pub mod sequence;
pub mod evolution;
pub mod oracle;
pub mod output;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use sequence::SequenceConfig;
pub use evolution::EvolutionConfig;
pub use oracle::OracleConfig;
pub use output::OutputConfig;
pub use traits::ConfigSection;
